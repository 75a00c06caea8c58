// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    error::Error,
    hw::{self, Bus, bv},
    vref::{Reference, Vref},
};

// DACON
pub const DALA: u8 = bv(2);
pub const DAOE: u8 = bv(1);
pub const DAEN: u8 = bv(0);

pub struct Dac<'a, B> {
    bus: &'a B,
}

impl<'a, B: Bus> Dac<'a, B> {
    /// Enable the DAC output, right adjusted.
    pub fn new(bus: &'a B) -> Self {
        bus.clear_bits(hw::DACON, DALA);
        bus.set_bits(hw::DACON, DAEN | DAOE);
        Self { bus }
    }

    /// The reference selection. Shared with the ADC.
    pub fn vref(&self) -> Vref<'a, B> {
        Vref::new(self.bus)
    }

    pub fn set_reference(&self, mode: Reference) {
        self.vref().set(mode);
    }

    pub fn get_reference(&self) -> Result<Reference, Error> {
        self.vref().get()
    }

    /// Output a 10 bit value. Higher bits are dropped.
    pub fn write(&self, value: u16) {
        let [l, h] = value.to_le_bytes();
        // DACH write commits the conversion.
        self.bus.write(hw::DACL, l);
        self.bus.write(hw::DACH, h & 0x03);
    }

    /// The currently output value.
    pub fn value(&self) -> u16 {
        u16::from_le_bytes([self.bus.read(hw::DACL), self.bus.read(hw::DACH) & 0x03])
    }
}


// vim: ts=4 sw=4 expandtab

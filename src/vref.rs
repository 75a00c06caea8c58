// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ADC/DAC voltage reference selection.
//!
//! The ADC and the DAC share the reference selection bits.
//! Independent references are not possible.

use crate::{
    error::Error,
    hw::{self, Bus, bv},
};

// ADMUX
pub const REFS1: u8 = bv(7);
pub const REFS0: u8 = bv(6);
const REFS_SHIFT: u8 = 6;

// ADCSRB
pub const ISRCEN: u8 = bv(6);
pub const AREFEN: u8 = bv(5);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Reference {
    /// External reference on the AREF pin. Internal reference off.
    External,
    /// AVcc with external capacitor on the AREF pin.
    AvccExtCap,
    /// AVcc, nothing connected to AREF.
    Avcc,
    /// Internal 2.56 V with external capacitor on the AREF pin.
    Internal2V56ExtCap,
    /// Internal 2.56 V.
    Internal2V56,
}

impl Reference {
    pub const ALL: [Reference; 5] = [
        Self::External,
        Self::AvccExtCap,
        Self::Avcc,
        Self::Internal2V56ExtCap,
        Self::Internal2V56,
    ];
}

/// The reference selection shared by ADC and DAC.
pub struct Vref<'a, B> {
    bus: &'a B,
}

impl<'a, B: Bus> Vref<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        Self { bus }
    }

    pub fn set(&self, mode: Reference) {
        let b = self.bus;
        match mode {
            Reference::External => {
                b.clear_bits(hw::ADMUX, REFS1 | REFS0);
                b.modify(hw::ADCSRB, |v| (v & !ISRCEN) | AREFEN);
            }
            Reference::AvccExtCap => {
                b.modify(hw::ADMUX, |v| (v & !REFS1) | REFS0);
                b.modify(hw::ADCSRB, |v| (v & !ISRCEN) | AREFEN);
            }
            Reference::Avcc => {
                b.modify(hw::ADMUX, |v| (v & !REFS1) | REFS0);
                b.clear_bits(hw::ADCSRB, ISRCEN | AREFEN);
            }
            Reference::Internal2V56ExtCap => {
                b.set_bits(hw::ADMUX, REFS1 | REFS0);
                b.modify(hw::ADCSRB, |v| (v & !ISRCEN) | AREFEN);
            }
            Reference::Internal2V56 => {
                b.set_bits(hw::ADMUX, REFS1 | REFS0);
                b.clear_bits(hw::ADCSRB, AREFEN);
            }
        }
    }

    /// Decode REFS1:0 and AREFEN back into the reference mode.
    pub fn get(&self) -> Result<Reference, Error> {
        let refs = (self.bus.read(hw::ADMUX) & (REFS1 | REFS0)) >> REFS_SHIFT;
        let aref = self.bus.is_set(hw::ADCSRB, AREFEN);
        match (refs, aref) {
            (0b00, _) => Ok(Reference::External),
            (0b01, true) => Ok(Reference::AvccExtCap),
            (0b01, false) => Ok(Reference::Avcc),
            (0b11, true) => Ok(Reference::Internal2V56ExtCap),
            (0b11, false) => Ok(Reference::Internal2V56),
            (bits, _) => Err(Error::InvalidReference(bits)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::SimBus;

    #[test]
    fn test_roundtrip() {
        let bus = SimBus::new();
        let vref = Vref::new(&bus);
        for mode in Reference::ALL {
            vref.set(mode);
            assert_eq!(vref.get(), Ok(mode));
        }
        // Any order of transitions.
        for from in Reference::ALL {
            for to in Reference::ALL {
                vref.set(from);
                vref.set(to);
                assert_eq!(vref.get(), Ok(to));
            }
        }
    }

    #[test]
    fn test_encoding() {
        let bus = SimBus::new();
        let vref = Vref::new(&bus);
        let table = [
            (Reference::External, 0b00, true),
            (Reference::AvccExtCap, 0b01, true),
            (Reference::Avcc, 0b01, false),
            (Reference::Internal2V56ExtCap, 0b11, true),
            (Reference::Internal2V56, 0b11, false),
        ];
        for (mode, refs, aref) in table {
            bus.set_reg(hw::ADMUX, 0x0B);
            bus.set_reg(hw::ADCSRB, ISRCEN | 0x03);
            vref.set(mode);
            assert_eq!(bus.reg(hw::ADMUX) >> REFS_SHIFT, refs);
            assert_eq!(bus.reg(hw::ADMUX) & 0x3F, 0x0B, "MUX bits touched");
            assert_eq!(bus.reg(hw::ADCSRB) & AREFEN != 0, aref);
            assert_eq!(bus.reg(hw::ADCSRB) & 0x0F, 0x03, "ADTS bits touched");
            let isrcen = bus.reg(hw::ADCSRB) & ISRCEN != 0;
            assert_eq!(isrcen, mode == Reference::Internal2V56);
        }
    }

    #[test]
    fn test_reserved_bits() {
        let bus = SimBus::new();
        bus.set_reg(hw::ADMUX, REFS1);
        assert_eq!(Vref::new(&bus).get(), Err(Error::InvalidReference(0b10)));
    }
}

// vim: ts=4 sw=4 expandtab

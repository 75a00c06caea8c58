// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    error::{Error, Wait},
    hw::{self, Bus, Reg, bv},
    poll::Poll,
    vref::{Reference, Vref},
};
use avr_int24::Int24;
use core::cell::Cell;

// ADCSRA
pub const ADEN: u8 = bv(7);
pub const ADSC: u8 = bv(6);
pub const ADIF: u8 = bv(4);
const ADPS_MASK: u8 = 0x07;

// ADMUX
pub const MUX_MASK: u8 = 0x1F;

// AMPnCSR
pub const AMPEN: u8 = bv(7);
const AMPG_SHIFT: u8 = 4;
const AMPG_MASK: u8 = 0x03 << AMPG_SHIFT;

const ADC_MASK: u16 = 0x3FF;

/// Number of conversions averaged per temperature reading.
const TEMP_SAMPLES: i16 = 100;
/// Sensor reading at 0 degC with the internal 2.56 V reference.
const TEMP_ZERO: i16 = 280;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClockDiv {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
}

impl ClockDiv {
    pub const ALL: [ClockDiv; 7] = [
        Self::Div2,
        Self::Div4,
        Self::Div8,
        Self::Div16,
        Self::Div32,
        Self::Div64,
        Self::Div128,
    ];

    /// ADPS2:0 bit pattern.
    pub const fn adps(&self) -> u8 {
        match self {
            Self::Div2 => 0b000,
            Self::Div4 => 0b010,
            Self::Div8 => 0b011,
            Self::Div16 => 0b100,
            Self::Div32 => 0b101,
            Self::Div64 => 0b110,
            Self::Div128 => 0b111,
        }
    }

    pub const fn ratio(&self) -> u8 {
        match self {
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
            Self::Div16 => 16,
            Self::Div32 => 32,
            Self::Div64 => 64,
            Self::Div128 => 128,
        }
    }
}

/// ADC input, as MUX4:0 code.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Channel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
    Adc8 = 8,
    Adc9 = 9,
    Adc10 = 10,
    Temp = 11,
    Vcc4 = 12,
    Amp0 = 14,
    Amp1 = 15,
    Amp2 = 16,
    Bandgap = 17,
    Gnd = 18,
}

impl Channel {
    pub const fn mux(&self) -> u8 {
        *self as u8
    }

    /// Control register of the differential amplifier in front of this channel.
    pub const fn amplifier(&self) -> Option<Reg> {
        match self {
            Self::Amp0 => Some(hw::AMP0CSR),
            Self::Amp1 => Some(hw::AMP1CSR),
            Self::Amp2 => Some(hw::AMP2CSR),
            _ => None,
        }
    }
}

/// Differential amplifier gain.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Gain {
    X5 = 0,
    X10 = 1,
    X20 = 2,
    X40 = 3,
}

impl Gain {
    pub const ALL: [Gain; 4] = [Self::X5, Self::X10, Self::X20, Self::X40];

    /// AMPnG1:0 field, in place.
    pub const fn bits(&self) -> u8 {
        (*self as u8) << AMPG_SHIFT
    }

    pub const fn factor(&self) -> u8 {
        match self {
            Self::X5 => 5,
            Self::X10 => 10,
            Self::X20 => 20,
            Self::X40 => 40,
        }
    }
}

/// Interpret a differential conversion result as signed value.
pub const fn diff_to_signed(raw: u16) -> i16 {
    let raw = (raw & ADC_MASK) as i16;
    if raw > 0x1FF { raw - ADC_MASK as i16 } else { raw }
}

pub struct Adc<'a, B> {
    bus: &'a B,
    poll: Poll,
    temp_offset: Cell<i8>,
}

impl<'a, B: Bus> Adc<'a, B> {
    /// Set the prescaler and enable the ADC.
    ///
    /// The reference should be selected before, see [Adc::vref].
    pub fn new(bus: &'a B, clock_div: ClockDiv, poll: Poll) -> Result<Self, Error> {
        let adc = Self {
            bus,
            poll,
            temp_offset: Cell::new(0),
        };

        bus.modify(hw::ADCSRA, |v| (v & !ADPS_MASK) | clock_div.adps());
        bus.set_bits(hw::ADCSRA, ADEN);

        // The first conversion after enabling the ADC is unreliable.
        adc.convert()?;

        Ok(adc)
    }

    /// The reference selection. Shared with the DAC.
    pub fn vref(&self) -> Vref<'a, B> {
        Vref::new(self.bus)
    }

    pub fn set_reference(&self, mode: Reference) {
        self.vref().set(mode);
    }

    pub fn get_reference(&self) -> Result<Reference, Error> {
        self.vref().get()
    }

    pub fn set_temperature_offset(&self, offset: i8) {
        self.temp_offset.set(offset);
    }

    pub fn temperature_offset(&self) -> i8 {
        self.temp_offset.get()
    }

    fn select(&self, channel: Channel) {
        self.bus
            .modify(hw::ADMUX, |v| (v & !MUX_MASK) | channel.mux());
    }

    fn convert(&self) -> Result<u16, Error> {
        self.bus.set_bits(hw::ADCSRA, ADSC);
        self.poll
            .wait(Wait::Conversion, || !self.bus.is_set(hw::ADCSRA, ADSC))?;
        Ok(self.bus.read_wide(hw::ADCL) & ADC_MASK)
    }

    /// Single-ended conversion. Returns 0..=1023.
    pub fn read(&self, channel: Channel) -> Result<u16, Error> {
        self.select(channel);
        self.convert()
    }

    /// Conversion through the differential amplifier.
    ///
    /// Channels without an amplifier are not converted and read as 0.
    pub fn read_differential(&self, channel: Channel, gain: Gain) -> Result<i16, Error> {
        let Some(ampcsr) = channel.amplifier() else {
            return Ok(0);
        };
        self.bus
            .modify(ampcsr, |v| (v & !AMPG_MASK) | AMPEN | gain.bits());
        Ok(diff_to_signed(self.read(channel)?))
    }

    /// Internal temperature sensor in degC.
    ///
    /// Temporarily switches the shared reference to the internal 2.56 V
    /// and restores the previous selection afterwards, also on error.
    pub fn read_temperature(&self) -> Result<i8, Error> {
        let vref = self.vref();
        let prev = vref.get()?;
        vref.set(Reference::Internal2V56);
        let temp = self.sample_temperature();
        vref.set(prev);
        temp
    }

    fn sample_temperature(&self) -> Result<i8, Error> {
        self.select(Channel::Temp);
        self.bus.settle();

        let mut sum = Int24::zero();
        for _ in 0..TEMP_SAMPLES {
            sum += Int24::from_i16(self.convert()? as i16);
        }
        let avg = (sum / Int24::from_i16(TEMP_SAMPLES)).to_i16();

        let temp = avg - TEMP_ZERO + self.temp_offset.get() as i16;
        Ok(temp as i8)
    }
}


// vim: ts=4 sw=4 expandtab

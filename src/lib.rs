// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UART, ADC and DAC drivers for the ATmega16M1, ATmega32M1 and ATmega64M1.
//!
//! All drivers are generic over [hw::Bus] and borrow it shared,
//! so one [hw::Mmio] instance serves every peripheral.
//! Busy-waits are bounded by a [poll::Poll] policy.

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod dac;
pub mod error;
pub mod hw;
pub mod poll;
pub mod uart;
pub mod vref;

#[cfg(test)]
mod sim;

pub use crate::{
    adc::{Adc, Channel, ClockDiv, Gain},
    dac::Dac,
    error::{Error, Wait},
    hw::{Bus, Mmio, Reg},
    poll::Poll,
    uart::{Uart, baud_divisor},
    vref::{Reference, Vref},
};

// vim: ts=4 sw=4 expandtab

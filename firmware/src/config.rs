// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use m1periph::{ClockDiv, Poll, Reference, baud_divisor};

/// CPU clock in Hz.
pub const FCPU: u32 = 8_000_000;

pub const BAUD: u32 = 115_200;
pub const BAUD_DIVISOR: u16 = baud_divisor(FCPU, BAUD);

/// Supply voltage in mV. Scale of the AVcc reference.
pub const VCC_MV: u32 = 5_000;

pub const ADC_REFERENCE: Reference = Reference::Avcc;
pub const ADC_CLOCK_DIV: ClockDiv = ClockDiv::Div64;

/// Offset correction of the internal temperature sensor in degC.
/// Depends on the individual chip.
pub const TEMP_OFFSET: i8 = 10;

/// Transmit and receive wait. The echo loop pokes the watchdog after each
/// receive timeout.
pub const UART_POLL: Poll = Poll::Retries(50_000);

/// A conversion at clock /128 takes less than 4000 CPU cycles.
pub const ADC_POLL: Poll = Poll::Retries(4_000);

// vim: ts=4 sw=4 expandtab

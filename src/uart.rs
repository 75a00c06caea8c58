// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UART on the LIN controller.

use crate::{
    error::{Error, Wait},
    hw::{self, Bus, bv},
    poll::Poll,
};

// LINCR
pub const LENA: u8 = bv(3);
pub const LCMD_FULL_DUPLEX: u8 = 0x07;

// LINSIR
pub const LBUSY: u8 = bv(4);
pub const LTXOK: u8 = bv(1);
pub const LRXOK: u8 = bv(0);

// LINENIR
pub const LENTXOK: u8 = bv(1);
pub const LENRXOK: u8 = bv(0);

// LINBTR
pub const LDISR: u8 = bv(7);

/// Samples per bit.
const LBT: u8 = 8;

/// RXD is PD4.
const PORTD_RXD: u8 = bv(4);

/// LINBRR holds 12 bits.
pub const BAUD_DIVISOR_MAX: u16 = 0x0FFF;

/// LINBRR value for the baud rate.
///
/// `baud` must not be 0. Rates too low for the 12 bit LINBRR
/// saturate at [BAUD_DIVISOR_MAX].
pub const fn baud_divisor(fcpu: u32, baud: u32) -> u16 {
    assert!(baud != 0, "baud rate 0");
    let div = (fcpu / 4 / baud).saturating_sub(1) / 2;
    if div > BAUD_DIVISOR_MAX as u32 {
        BAUD_DIVISOR_MAX
    } else {
        div as u16
    }
}

/// Read a line from `next` into `buf`.
///
/// `next` returns `None` at end of input.
/// At most `buf.len() - 1` characters are stored and NUL terminated.
/// The rest of a longer line is discarded.
/// Returns the number of stored characters, or `None` if the input
/// ended before any character was stored.
pub fn read_line(mut next: impl FnMut() -> Option<u8>, buf: &mut [u8]) -> Option<usize> {
    let max = buf.len().saturating_sub(1);
    let mut count = 0;
    let mut eof = true;
    while let Some(c) = next() {
        if c == b'\n' {
            eof = false;
            break;
        }
        if count < max {
            buf[count] = c;
            count += 1;
        }
    }
    if eof && count == 0 {
        return None;
    }
    if let Some(term) = buf.get_mut(count) {
        *term = 0;
    }
    Some(count)
}

pub struct Uart<'a, B> {
    bus: &'a B,
    poll: Poll,
}

impl<'a, B: Bus> Uart<'a, B> {
    /// Initialize the LIN controller in UART mode.
    ///
    /// `divisor` is the LINBRR value, see [baud_divisor].
    pub fn new(bus: &'a B, divisor: u16, poll: Poll) -> Result<Self, Error> {
        let uart = Self { bus, poll };

        bus.write(hw::LINBTR, LDISR);
        bus.set_bits(hw::LINBTR, LBT);
        bus.write_wide(hw::LINBRRL, divisor);

        uart.wait_ready()?;

        bus.write(hw::LINCR, LENA);
        bus.set_bits(hw::LINCR, LCMD_FULL_DUPLEX);
        bus.set_bits(hw::PORTD, PORTD_RXD);
        bus.set_bits(hw::LINENIR, LENRXOK | LENTXOK);

        Ok(uart)
    }

    fn wait_ready(&self) -> Result<(), Error> {
        self.poll
            .wait(Wait::LinReady, || !self.bus.is_set(hw::LINSIR, LBUSY))
    }

    pub fn write_byte(&self, data: u8) -> Result<(), Error> {
        self.wait_ready()?;
        self.bus.write(hw::LINDAT, data);
        Ok(())
    }

    pub fn write_bytes(&self, data: &[u8]) -> Result<(), Error> {
        data.iter().try_for_each(|&b| self.write_byte(b))
    }

    pub fn read_byte(&self) -> Result<u8, Error> {
        self.wait_ready()?;
        self.poll
            .wait(Wait::RxComplete, || self.bus.is_set(hw::LINSIR, LRXOK))?;
        Ok(self.bus.read(hw::LINDAT))
    }

    /// Read a line from the receiver. See [read_line].
    ///
    /// A receive timeout ends the input.
    pub fn read_line(&self, buf: &mut [u8]) -> Option<usize> {
        read_line(|| self.read_byte().ok(), buf)
    }

    /// Read a line from the receiver, waiting as long as it takes.
    ///
    /// A receive timeout does not end the line. `idle` runs after each
    /// timeout, e.g. to keep the watchdog alive.
    pub fn read_line_waiting(&self, buf: &mut [u8], mut idle: impl FnMut()) -> usize {
        let next = || loop {
            match self.read_byte() {
                Ok(b) => return Some(b),
                Err(_) => idle(),
            }
        };
        read_line(next, buf).unwrap_or(0)
    }
}

impl<B: Bus> ufmt::uWrite for Uart<'_, B> {
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }
}

impl<B: Bus> core::fmt::Write for Uart<'_, B> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}


// vim: ts=4 sw=4 expandtab

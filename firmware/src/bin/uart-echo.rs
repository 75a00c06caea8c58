// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Echo every received line.

#![no_std]
#![no_main]

use m1demo::{
    config::{BAUD, BAUD_DIVISOR, UART_POLL},
    dbg_log,
    hw::{unwrap_option, unwrap_result, wdt_init, wdt_poke},
};
use m1periph::{Mmio, Uart};

#[unsafe(export_name = "main")]
pub extern "C" fn main() -> ! {
    wdt_init();

    let bus = unwrap_option(Mmio::take());
    let mut uart = unwrap_result(Uart::new(&bus, BAUD_DIVISOR, UART_POLL));
    dbg_log!(&mut uart, "uart: {} baud, LINBRR={}", BAUD, BAUD_DIVISOR);

    let _ = ufmt::uwriteln!(&mut uart, "Hi, the number is {}!", 10_u8);

    let mut line = [0_u8; 256];
    loop {
        wdt_poke();
        let len = uart.read_line_waiting(&mut line, wdt_poke);
        let text = core::str::from_utf8(&line[..len]).unwrap_or("<not UTF-8>");
        let _ = ufmt::uwriteln!(&mut uart, "You typed \"{}\"", text);
    }
}

// vim: ts=4 sw=4 expandtab

// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug log lines on the UART.
//!
//! Write errors are ignored. A log line must never stop the program.

/// Log a line to the UART.
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_log {
    ($uart:expr, $($arg:tt)*) => {{
        let _ = ufmt::uwriteln!($uart, $($arg)*);
    }};
}

/// Log a line to the UART. Disabled.
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_log {
    ($uart:expr, $($arg:tt)*) => {{
        if false {
            let _ = ufmt::uwriteln!($uart, $($arg)*);
        }
    }};
}

// vim: ts=4 sw=4 expandtab

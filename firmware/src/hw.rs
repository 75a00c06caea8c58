// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::FCPU;

/// Watchdog timer control register (data space).
const WDTCSR: u8 = 0x60;

/// Delay loop iterations per millisecond. One iteration takes 4 cycles.
const LOOPS_PER_MS: u16 = (FCPU / 1000 / 4) as u16;

/// Enable the watchdog with a timeout of 2 s.
pub fn wdt_init() {
    // SAFETY: The asm code only accesses the WDT registers
    //         which are not accessed from anywhere else in the program.
    //         Interrupts are disabled after reset, so the timed
    //         sequence cannot be interrupted.
    unsafe {
        core::arch::asm!(
            "ldi {tmp}, 0x18", // WDCE=1, WDE=1
            "sts {WDTCSR}, {tmp}",
            "ldi {tmp}, 0x0F", // WDE=1, WDP3=0, WDP2=1, WDP1=1, WDP0=1
            "sts {WDTCSR}, {tmp}",
            tmp = out(reg_upper) _,
            WDTCSR = const WDTCSR,
            options(nostack, preserves_flags)
        );
    }
}

#[inline(always)]
pub fn wdt_poke() {
    // SAFETY: `wdr` only restarts the watchdog timer.
    unsafe {
        core::arch::asm!("wdr", options(nomem, nostack, preserves_flags));
    }
}

/// Busy wait. Keeps the watchdog alive.
pub fn delay_ms(ms: u16) {
    for _ in 0..ms {
        wdt_poke();
        // SAFETY: Register-only countdown loop.
        unsafe {
            core::arch::asm!(
                "1: sbiw {cnt}, 1",
                "brne 1b",
                cnt = inout(reg_iw) LOOPS_PER_MS => _,
                options(nomem, nostack)
            );
        }
    }
}

/// Cheaper Option::unwrap() alternative.
///
/// This is cheaper, because it doesn't call into the panic unwind path.
/// Therefore, it does not impose caller-saves overhead onto the calling function.
#[inline(always)]
pub fn unwrap_option<T>(value: Option<T>) -> T {
    match value {
        Some(value) => value,
        None => reset_system(),
    }
}

/// Cheaper Result::unwrap() alternative.
#[inline(always)]
pub fn unwrap_result<T, E>(value: Result<T, E>) -> T {
    match value {
        Ok(value) => value,
        Err(_) => reset_system(),
    }
}

/// Reset the system.
#[inline(always)]
#[allow(clippy::empty_loop)]
pub fn reset_system() -> ! {
    loop {
        // Wait for the watchdog timer to trigger and reset the system.
    }
}

#[inline(always)]
#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    reset_system();
}

// vim: ts=4 sw=4 expandtab

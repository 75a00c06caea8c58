// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print ADC readings once per second and sweep the DAC.

#![no_std]
#![no_main]

use m1demo::{
    config::{
        ADC_CLOCK_DIV, ADC_POLL, ADC_REFERENCE, BAUD_DIVISOR, TEMP_OFFSET, UART_POLL, VCC_MV,
    },
    dbg_log,
    hw::{delay_ms, unwrap_option, unwrap_result, wdt_init},
};
use m1periph::{Adc, Channel, Dac, Gain, Mmio, Uart, Vref};

const DAC_MAX: u16 = 0x3FF;
const AMP0_GAIN: Gain = Gain::X5;

/// Convert a reading against the AVcc reference to mV.
fn millivolts(raw: u16) -> u32 {
    raw as u32 * VCC_MV / 1024
}

/// Differential reading relative to full scale, in mV.
fn diff_millivolts(diff: i16) -> i32 {
    diff as i32 * 1000 / 512
}

#[unsafe(export_name = "main")]
pub extern "C" fn main() -> ! {
    wdt_init();

    let bus = unwrap_option(Mmio::take());
    let mut uart = unwrap_result(Uart::new(&bus, BAUD_DIVISOR, UART_POLL));
    let _ = ufmt::uwrite!(&mut uart, "\n\n\nStarting ADC example...\n");

    Vref::new(&bus).set(ADC_REFERENCE);
    let adc = unwrap_result(Adc::new(&bus, ADC_CLOCK_DIV, ADC_POLL));
    adc.set_temperature_offset(TEMP_OFFSET);
    dbg_log!(
        &mut uart,
        "adc: clock /{}, temp offset {}",
        ADC_CLOCK_DIV.ratio(),
        TEMP_OFFSET
    );

    let dac = Dac::new(&bus);

    let mut dac_value: u16 = 0;
    loop {
        let _ = ufmt::uwrite!(&mut uart, "\nNew data:\n");

        match adc.read(Channel::Vcc4) {
            Ok(raw) => {
                let _ = ufmt::uwriteln!(&mut uart, "VCC/4= {}mV", millivolts(raw));
            }
            Err(e) => dbg_log!(&mut uart, "VCC/4: {}", e),
        }

        match adc.read_temperature() {
            Ok(temp) => {
                let _ = ufmt::uwriteln!(&mut uart, "Temp= {} degC", temp);
            }
            Err(e) => dbg_log!(&mut uart, "temp: {}", e),
        }

        match adc.read_differential(Channel::Amp0, AMP0_GAIN) {
            Ok(diff) => {
                let _ = ufmt::uwriteln!(
                    &mut uart,
                    "adc_diff_value= {} ({}mV, gain x{})",
                    diff,
                    diff_millivolts(diff),
                    AMP0_GAIN.factor()
                );
            }
            Err(e) => dbg_log!(&mut uart, "AMP0: {}", e),
        }

        let _ = ufmt::uwriteln!(
            &mut uart,
            "dac_value= {} ({}mV)",
            dac_value,
            millivolts(dac_value)
        );
        dac.write(dac_value);
        dac_value = if dac_value >= DAC_MAX { 0 } else { dac_value + 1 };

        delay_ms(1000);
    }
}

// vim: ts=4 sw=4 expandtab

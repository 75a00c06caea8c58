// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated register file for the unit tests.

use crate::{
    adc::{ADEN, ADIF, ADSC, MUX_MASK},
    hw::{self, Bus, Reg},
    uart::{LBUSY, LRXOK},
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

/// Register state at the start of a conversion.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Conversion {
    pub admux: u8,
    pub adcsrb: u8,
}

pub struct SimBus {
    regs: RefCell<[u8; 256]>,
    writes: RefCell<Vec<(Reg, u8)>>,
    reads: RefCell<Vec<Reg>>,
    adc_input: RefCell<[u16; 32]>,
    adc_queue: RefCell<VecDeque<u16>>,
    adc_stuck: Cell<bool>,
    conversions: RefCell<Vec<Conversion>>,
    lin_busy: Cell<u32>,
    lin_busy_after_tx: Cell<u32>,
    lin_stuck: Cell<bool>,
    rx: RefCell<VecDeque<u8>>,
    tx: RefCell<Vec<u8>>,
    settled: Cell<u32>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            regs: RefCell::new([0; 256]),
            writes: RefCell::new(Vec::new()),
            reads: RefCell::new(Vec::new()),
            adc_input: RefCell::new([0; 32]),
            adc_queue: RefCell::new(VecDeque::new()),
            adc_stuck: Cell::new(false),
            conversions: RefCell::new(Vec::new()),
            lin_busy: Cell::new(0),
            lin_busy_after_tx: Cell::new(0),
            lin_stuck: Cell::new(false),
            rx: RefCell::new(VecDeque::new()),
            tx: RefCell::new(Vec::new()),
            settled: Cell::new(0),
        }
    }

    /// Raw register value, without side effects or logging.
    pub fn reg(&self, reg: Reg) -> u8 {
        self.regs.borrow()[reg.0 as usize]
    }

    /// Set a raw register value, without side effects or logging.
    pub fn set_reg(&self, reg: Reg, value: u8) {
        self.regs.borrow_mut()[reg.0 as usize] = value;
    }

    pub fn writes_to(&self, regs: &[Reg]) -> Vec<(Reg, u8)> {
        self.writes
            .borrow()
            .iter()
            .copied()
            .filter(|(r, _)| regs.contains(r))
            .collect()
    }

    pub fn reads(&self) -> Vec<Reg> {
        self.reads.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.writes.borrow_mut().clear();
        self.reads.borrow_mut().clear();
        self.conversions.borrow_mut().clear();
        self.tx.borrow_mut().clear();
    }

    /// Result of every conversion on the channel with this MUX code.
    pub fn set_adc_input(&self, mux: u8, value: u16) {
        self.adc_input.borrow_mut()[(mux & MUX_MASK) as usize] = value;
    }

    /// Results of the next conversions, regardless of the channel.
    pub fn push_adc(&self, values: &[u16]) {
        self.adc_queue.borrow_mut().extend(values.iter().copied());
    }

    /// Never finish a started conversion.
    pub fn set_adc_stuck(&self, stuck: bool) {
        self.adc_stuck.set(stuck);
    }

    pub fn conversions(&self) -> Vec<Conversion> {
        self.conversions.borrow().clone()
    }

    /// Report LBUSY on the next `reads` reads of LINSIR.
    pub fn set_lin_busy(&self, reads: u32) {
        self.lin_busy.set(reads);
    }

    /// Report LBUSY on this many LINSIR reads after each LINDAT write.
    pub fn set_lin_busy_after_tx(&self, reads: u32) {
        self.lin_busy_after_tx.set(reads);
    }

    pub fn set_lin_stuck(&self, stuck: bool) {
        self.lin_stuck.set(stuck);
    }

    pub fn push_rx(&self, data: &[u8]) {
        self.rx.borrow_mut().extend(data.iter().copied());
    }

    pub fn tx(&self) -> Vec<u8> {
        self.tx.borrow().clone()
    }

    pub fn settled(&self) -> u32 {
        self.settled.get()
    }

    fn convert(&self) {
        let mut regs = self.regs.borrow_mut();
        let admux = regs[hw::ADMUX.0 as usize];
        self.conversions.borrow_mut().push(Conversion {
            admux,
            adcsrb: regs[hw::ADCSRB.0 as usize],
        });
        let value = self
            .adc_queue
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.adc_input.borrow()[(admux & MUX_MASK) as usize])
            & 0x3FF;
        let [l, h] = value.to_le_bytes();
        regs[hw::ADCL.0 as usize] = l;
        regs[hw::ADCH.0 as usize] = h;
        let adcsra = &mut regs[hw::ADCSRA.0 as usize];
        *adcsra = (*adcsra & !ADSC) | ADIF;
    }
}

impl Bus for SimBus {
    fn read(&self, reg: Reg) -> u8 {
        self.reads.borrow_mut().push(reg);
        match reg {
            hw::LINSIR => {
                let mut value = self.reg(reg) & !(LBUSY | LRXOK);
                let busy = self.lin_busy.get();
                if self.lin_stuck.get() || busy > 0 {
                    value |= LBUSY;
                    self.lin_busy.set(busy.saturating_sub(1));
                }
                if !self.rx.borrow().is_empty() {
                    value |= LRXOK;
                }
                value
            }
            hw::LINDAT => {
                if let Some(data) = self.rx.borrow_mut().pop_front() {
                    self.set_reg(reg, data);
                }
                self.reg(reg)
            }
            _ => self.reg(reg),
        }
    }

    fn write(&self, reg: Reg, value: u8) {
        self.writes.borrow_mut().push((reg, value));
        self.set_reg(reg, value);
        match reg {
            hw::ADCSRA => {
                if value & ADSC != 0 && value & ADEN != 0 && !self.adc_stuck.get() {
                    self.convert();
                }
            }
            hw::LINDAT => {
                self.tx.borrow_mut().push(value);
                self.lin_busy.set(self.lin_busy_after_tx.get());
            }
            _ => (),
        }
    }

    fn settle(&self) {
        self.settled.set(self.settled.get() + 1);
    }
}

// vim: ts=4 sw=4 expandtab

// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::{
    marker::PhantomData,
    sync::atomic::{AtomicBool, Ordering},
};

/// Register address in the data space.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Reg(pub u8);

impl Reg {
    /// The high byte partner of a 16 bit register pair.
    pub const fn hi(self) -> Reg {
        Reg(self.0 + 1)
    }
}

// ATmega16M1/32M1/64M1 data space addresses.
pub const PORTD: Reg = Reg(0x2B);
pub const AMP0CSR: Reg = Reg(0x75);
pub const AMP1CSR: Reg = Reg(0x76);
pub const AMP2CSR: Reg = Reg(0x77);
pub const ADCL: Reg = Reg(0x78);
pub const ADCH: Reg = Reg(0x79);
pub const ADCSRA: Reg = Reg(0x7A);
pub const ADCSRB: Reg = Reg(0x7B);
pub const ADMUX: Reg = Reg(0x7C);
pub const DACON: Reg = Reg(0x90);
pub const DACL: Reg = Reg(0x91);
pub const DACH: Reg = Reg(0x92);
pub const LINCR: Reg = Reg(0xC8);
pub const LINSIR: Reg = Reg(0xC9);
pub const LINENIR: Reg = Reg(0xCA);
pub const LINBTR: Reg = Reg(0xCC);
pub const LINBRRL: Reg = Reg(0xCD);
pub const LINBRRH: Reg = Reg(0xCE);
pub const LINDAT: Reg = Reg(0xD2);

/// Bit mask of a single register bit.
pub const fn bv(bit: u8) -> u8 {
    1 << bit
}

/// Access to the peripheral registers.
pub trait Bus {
    fn read(&self, reg: Reg) -> u8;

    fn write(&self, reg: Reg, value: u8);

    /// Short busy delay, e.g. to let an analog multiplexer settle.
    fn settle(&self);

    #[inline]
    fn modify(&self, reg: Reg, f: impl FnOnce(u8) -> u8) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    #[inline]
    fn set_bits(&self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    #[inline]
    fn clear_bits(&self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }

    #[inline]
    fn is_set(&self, reg: Reg, mask: u8) -> bool {
        self.read(reg) & mask != 0
    }

    /// Read a 16 bit register pair.
    /// The low byte must be read first. It latches the high byte.
    #[inline]
    fn read_wide(&self, lo: Reg) -> u16 {
        let l = self.read(lo);
        let h = self.read(lo.hi());
        u16::from_le_bytes([l, h])
    }

    /// Write a 16 bit register pair.
    /// The high byte goes to the temp register and is committed by the low byte write.
    #[inline]
    fn write_wide(&self, lo: Reg, value: u16) {
        let [l, h] = value.to_le_bytes();
        self.write(lo.hi(), h);
        self.write(lo, l);
    }
}

static MMIO_TAKEN: AtomicBool = AtomicBool::new(false);

/// Memory mapped register access on the real hardware.
pub struct Mmio {
    _not_sync: PhantomData<*const ()>,
}

impl Mmio {
    /// Get the register bus.
    /// Returns `None` on every call but the first.
    pub fn take() -> Option<Self> {
        // There is only one thread of execution and no interrupt takes the bus.
        // A load/store pair is sufficient and works without CAS on AVR.
        if MMIO_TAKEN.load(Ordering::Relaxed) {
            None
        } else {
            MMIO_TAKEN.store(true, Ordering::Relaxed);
            // SAFETY: The flag guarantees that this is the only instance.
            Some(unsafe { Self::steal() })
        }
    }

    /// Get the register bus without checking for other instances.
    ///
    /// # Safety
    ///
    /// Must only be used on an ATmega16M1, ATmega32M1 or ATmega64M1.
    /// Other instances must not be used to reconfigure peripherals
    /// that the drivers of this instance operate.
    #[inline(always)]
    pub const unsafe fn steal() -> Self {
        Self {
            _not_sync: PhantomData,
        }
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read(&self, reg: Reg) -> u8 {
        // SAFETY: `reg` is a register address of the M1 data space.
        //         Existence of `Mmio` proves that we run on that hardware.
        unsafe { core::ptr::read_volatile(reg.0 as usize as *const u8) }
    }

    #[inline(always)]
    fn write(&self, reg: Reg, value: u8) {
        // SAFETY: See `read`.
        unsafe { core::ptr::write_volatile(reg.0 as usize as *mut u8, value) }
    }

    #[inline(never)]
    fn settle(&self) {
        for i in 0..255_u8 {
            core::hint::black_box(i);
        }
    }
}


// vim: ts=4 sw=4 expandtab

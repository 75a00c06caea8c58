// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Board support for the M1 example programs.

#![no_std]
#![feature(asm_experimental_arch)]

pub mod config;
pub mod debug;
pub mod hw;

// vim: ts=4 sw=4 expandtab

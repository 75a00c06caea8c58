// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::{Error, Wait};

/// Busy-wait policy for hardware flags.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Poll {
    /// Spin until the flag changes. A stuck peripheral hangs the caller.
    #[default]
    Forever,
    /// Give up after this many additional checks.
    Retries(u32),
}

impl Poll {
    /// Spin until `ready` returns true.
    #[inline]
    pub fn wait(self, what: Wait, mut ready: impl FnMut() -> bool) -> Result<(), Error> {
        match self {
            Self::Forever => {
                while !ready() {}
                Ok(())
            }
            Self::Retries(mut retries) => loop {
                if ready() {
                    break Ok(());
                }
                if retries == 0 {
                    break Err(Error::Timeout(what));
                }
                retries -= 1;
            },
        }
    }
}


// vim: ts=4 sw=4 expandtab

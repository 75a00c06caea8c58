// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use derive_more::Display;
use ufmt::{uDisplay, uWrite};

/// The hardware flag a driver was waiting for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Wait {
    LinReady,
    RxComplete,
    Conversion,
}

impl Wait {
    const fn name(&self) -> &'static str {
        match self {
            Self::LinReady => "LIN ready",
            Self::RxComplete => "receive complete",
            Self::Conversion => "ADC conversion",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum Error {
    /// The poll budget ran out before the flag changed.
    #[display("timeout waiting for {_0}")]
    Timeout(Wait),
    /// REFS1:0 holds the reserved pattern.
    #[display("invalid reference selection {_0:#04b}")]
    InvalidReference(u8),
}

impl core::error::Error for Error {}

impl core::fmt::Display for Wait {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl uDisplay for Wait {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}

impl uDisplay for Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Self::Timeout(wait) => ufmt::uwrite!(f, "timeout waiting for {}", wait),
            Self::InvalidReference(bits) => ufmt::uwrite!(f, "invalid reference selection {}", bits),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::Timeout(Wait::Conversion).to_string(),
            "timeout waiting for ADC conversion"
        );
        assert_eq!(
            Error::InvalidReference(2).to_string(),
            "invalid reference selection 0b10"
        );
    }

    #[test]
    fn test_udisplay() {
        let mut s = String::new();
        ufmt::uwrite!(&mut s, "{}", Error::Timeout(Wait::RxComplete)).unwrap();
        assert_eq!(s, "timeout waiting for receive complete");

        let mut s = String::new();
        ufmt::uwrite!(&mut s, "{}", Error::InvalidReference(2)).unwrap();
        assert_eq!(s, "invalid reference selection 2");
    }

    #[test]
    fn test_wait_names() {
        for wait in [Wait::LinReady, Wait::RxComplete, Wait::Conversion] {
            let mut s = String::new();
            ufmt::uwrite!(&mut s, "{}", wait).unwrap();
            assert_eq!(s, wait.to_string());
        }
        assert_eq!(Wait::LinReady.to_string(), "LIN ready");
    }
}

// vim: ts=4 sw=4 expandtab

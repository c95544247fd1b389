use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Trust-root object or session handle (`TPM_HANDLE`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    /// Well-known persistent handle of the demo storage key
    pub const DEMO_STORAGE_KEY: Handle = Handle(0x8100_0200);

    /// Password authorization session (`TPM_RS_PW`)
    pub const PASSWORD_SESSION: Handle = Handle(0x4000_0009);

    pub const TRANSIENT_FIRST: u32 = 0x8000_0000;
    pub const PERSISTENT_FIRST: u32 = 0x8100_0000;
    const HANDLE_TYPE_MASK: u32 = 0xFF00_0000;

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_transient(self) -> bool {
        self.0 & Self::HANDLE_TYPE_MASK == Self::TRANSIENT_FIRST
    }

    pub const fn is_persistent(self) -> bool {
        self.0 & Self::HANDLE_TYPE_MASK == Self::PERSISTENT_FIRST
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(0x{:08x})", self.0)
    }
}

/// Parses `0x81000200` or `81000200` (always hexadecimal)
impl FromStr for Handle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 8 {
            return Err(HandleError::Malformed {
                input: s.to_string(),
            });
        }

        u32::from_str_radix(digits, 16)
            .map(Handle)
            .map_err(|_| HandleError::Malformed {
                input: s.to_string(),
            })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("Handle must be a 32-bit hexadecimal value, got {input:?}")]
    Malformed { input: String },
}

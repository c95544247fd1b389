use thiserror::Error;

use super::Handle;

/// Authorization slot of a command (`TPMS_AUTH_COMMAND` position)
///
/// A command carries up to [`SessionSlot::MAX_SESSIONS`] authorization
/// entries. Every slot here is a password session (`TPM_RS_PW`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSlot(u8);

impl SessionSlot {
    pub const MAX_SESSIONS: u8 = 3;

    pub fn new(index: u8) -> Result<Self, SlotError> {
        if index >= Self::MAX_SESSIONS {
            return Err(SlotError::OutOfRange {
                index,
                max: Self::MAX_SESSIONS,
            });
        }
        Ok(Self(index))
    }

    /// The slot used for the storage key authorization
    pub const fn primary() -> Self {
        Self(0)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn session_handle(self) -> Handle {
        Handle::PASSWORD_SESSION
    }
}

impl Default for SessionSlot {
    fn default() -> Self {
        Self::primary()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Session slot {index} out of range (max {max})")]
    OutOfRange { index: u8, max: u8 },
}

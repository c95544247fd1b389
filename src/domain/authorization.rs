//! Password authorization for the single command session
//!
//! A run authorizes twice. Reading the parent's public area needs no secret
//! and uses a [`NullAuthorization`]. Wrapping and loading need the parent's
//! secret, bound to that parent, as a [`ParentAuthorization`]. The second
//! can only be built from a [`ResolvedParent`], so nothing can be wrapped
//! before its parent was resolved.

use super::ResolvedParent;
use crate::model::{AuthSecret, Handle, SessionSlot};

/// Binds secrets to a session slot. Purely local, never talks to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionAuthorizer {
    slot: SessionSlot,
}

impl SessionAuthorizer {
    pub fn new(slot: SessionSlot) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> SessionSlot {
        self.slot
    }

    /// Empty secret for commands that need no authorization
    pub fn attach_null(&self) -> NullAuthorization {
        NullAuthorization { slot: self.slot }
    }

    /// Bind `secret` to the slot and to the resolved parent's handle
    pub fn attach(&self, parent: &ResolvedParent, secret: AuthSecret) -> ParentAuthorization {
        ParentAuthorization {
            slot: self.slot,
            handle: parent.handle(),
            secret,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullAuthorization {
    slot: SessionSlot,
}

impl NullAuthorization {
    pub fn slot(&self) -> SessionSlot {
        self.slot
    }

    pub fn session_handle(&self) -> Handle {
        self.slot.session_handle()
    }
}

/// Parent secret bound to one parent handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentAuthorization {
    slot: SessionSlot,
    handle: Handle,
    secret: AuthSecret,
}

impl ParentAuthorization {
    pub fn slot(&self) -> SessionSlot {
        self.slot
    }

    pub fn session_handle(&self) -> Handle {
        self.slot.session_handle()
    }

    /// Parent handle this authorization was bound to
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn secret(&self) -> &AuthSecret {
        &self.secret
    }

    pub fn authorizes(&self, handle: Handle) -> bool {
        self.handle == handle
    }
}

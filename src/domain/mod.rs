//! Core import flow building blocks
//!
//! The session guard owns the device for one run. Authorization comes in two
//! typed phases, and the parent resolver sits between them.

mod authorization;
mod parent;
mod session;

pub use authorization::{NullAuthorization, ParentAuthorization, SessionAuthorizer};
pub use parent::{resolve, ResolvedParent};
pub use session::DeviceSession;

//! Use cases (orchestration)
//!
//! This module contains use cases that orchestrate operations across multiple ports.
//! Each run opens one device session and releases it on every exit path.

mod import_key;
mod load_key;

pub use import_key::{import_key, ImportReport, ImportRequest};
pub use load_key::{load_key, LoadReport, LoadRequest};

use crate::error::KeyImportError;
use crate::model::{Handle, ResponseCode};

/// Classify a failed wrap or load command
fn command_error(operation: &'static str, parent: Handle, rc: ResponseCode) -> KeyImportError {
    if rc.is_auth_failure() {
        KeyImportError::Authorization { handle: parent, rc }
    } else if rc.is_material_error() {
        KeyImportError::UnsupportedMaterial {
            reason: format!("{operation} rejected the key: {}", rc.as_str()),
            rc,
        }
    } else {
        KeyImportError::Device { operation, rc }
    }
}

//! Import external RSA and ECC private keys under a TPM 2.0 storage key
//!
//! The key material is wrapped by the trust root under a storage parent and
//! the resulting protected key (public and private area) is persisted as a
//! blob that can later be loaded under the same parent.

mod adapters;
pub mod api;
pub mod cli;
pub mod demo_keys;
pub mod domain;
pub mod error;
pub mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use adapters::{read_blob, ConsoleSink, FileSink, SimulatedConnector, SimulatedTpm};
pub use error::{KeyImportError, KeyImportResult};

// Re-export public API
pub use api::{import_to_console, import_to_file, load_from_file};

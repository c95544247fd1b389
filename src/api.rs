//! Entry points used by the command line tools
//!
//! Each call imports or loads against a freshly opened session on the
//! simulated trust root provisioned with the demo storage key.

use std::path::Path;

use crate::adapters::{read_blob, ConsoleSink, FileSink, SimulatedConnector};
use crate::demo_keys;
use crate::error::KeyImportResult;
use crate::use_cases::{
    import_key as import_key_use_case, load_key as load_key_use_case, ImportReport,
    ImportRequest, LoadRequest, LoadReport,
};

pub use crate::model::*;

/// Import the built-in key for `algorithm` and write the blob to `path`
pub fn import_to_file(
    path: &Path,
    algorithm: Algorithm,
    parent_handle: Handle,
    parent_auth: AuthSecret,
) -> KeyImportResult<ImportReport> {
    let request = demo_request(algorithm)?.with_parent(parent_handle, parent_auth);
    import_key_use_case(&SimulatedConnector::demo(), request, &mut FileSink::new(path))
}

/// Import the built-in key for `algorithm` and print both areas as hex
pub fn import_to_console(
    algorithm: Algorithm,
    parent_handle: Handle,
    parent_auth: AuthSecret,
) -> KeyImportResult<ImportReport> {
    let request = demo_request(algorithm)?.with_parent(parent_handle, parent_auth);
    import_key_use_case(
        &SimulatedConnector::demo(),
        request,
        &mut ConsoleSink::stdout(),
    )
}

/// Read a blob from `path` and load it under the parent
pub fn load_from_file(
    path: &Path,
    parent_handle: Handle,
    parent_auth: AuthSecret,
) -> KeyImportResult<LoadReport> {
    let blob = read_blob(path)?;
    let request = LoadRequest {
        parent_handle,
        parent_auth,
        ..LoadRequest::default()
    };
    load_key_use_case(&SimulatedConnector::demo(), request, &blob)
}

fn demo_request(algorithm: Algorithm) -> KeyImportResult<ImportRequest> {
    Ok(ImportRequest::new(demo_keys::material(algorithm)?))
}

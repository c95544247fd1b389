//! Import key use case
//!
//! Wraps key material under a storage parent and hands the protected key
//! to a [`BlobSink`].

use tracing::{debug, error, info, warn};

use super::command_error;
use crate::domain::{resolve, DeviceSession, SessionAuthorizer};
use crate::error::KeyImportResult;
use crate::model::{
    Algorithm, AuthSecret, Handle, ImportStage, KeyMaterial, ProtectedKey, SessionSlot,
};
use crate::ports::{BlobSink, DeviceConnector};

/// Everything an import run needs
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub parent_handle: Handle,
    pub parent_auth: AuthSecret,
    pub slot: SessionSlot,
    pub material: KeyMaterial,
}

impl ImportRequest {
    /// Import `material` under the demo storage key
    pub fn new(material: KeyMaterial) -> Self {
        Self {
            parent_handle: Handle::DEMO_STORAGE_KEY,
            parent_auth: AuthSecret::demo_storage_key(),
            slot: SessionSlot::primary(),
            material,
        }
    }

    pub fn with_parent(mut self, handle: Handle, auth: AuthSecret) -> Self {
        self.parent_handle = handle;
        self.parent_auth = auth;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub algorithm: Algorithm,
    pub parent: Handle,
    pub public_size: usize,
    pub private_size: usize,
    pub bytes_written: usize,
    pub destination: String,
    pub key: ProtectedKey,
}

/// Import key material into the trust root and persist the result
///
/// This function orchestrates the complete import workflow:
/// 1. Open a device session and resolve the storage parent
/// 2. Bind the parent's secret to the session slot
/// 3. Wrap the material under the parent (RSA or ECC)
/// 4. Hand the protected key to `sink`
/// 5. Unload the transient key and close the session
///
/// # Arguments
///
/// * `connector` - Opens the device session
/// * `request` - Parent, secret, slot and key material
/// * `sink` - Destination of the protected key
///
/// # Errors
///
/// Returns errors if:
/// - The session cannot be opened
/// - The parent cannot be resolved
/// - The trust root rejects the secret or the material
/// - The sink cannot be written
///
/// The transient key and the session are released in every case.
pub fn import_key<C, S>(
    connector: &C,
    request: ImportRequest,
    sink: &mut S,
) -> KeyImportResult<ImportReport>
where
    C: DeviceConnector,
    S: BlobSink,
{
    let mut stage = ImportStage::Init;
    let result = run(connector, request, sink, &mut stage);

    if let Err(err) = &result {
        error!("Key import failed at stage {stage}: {err}");
        stage = ImportStage::Error;
    }
    debug!("Key import finished in stage {stage}");

    result
}

fn run<C, S>(
    connector: &C,
    request: ImportRequest,
    sink: &mut S,
    stage: &mut ImportStage,
) -> KeyImportResult<ImportReport>
where
    C: DeviceConnector,
    S: BlobSink,
{
    let ImportRequest {
        parent_handle,
        parent_auth,
        slot,
        material,
    } = request;
    let algorithm = material.algorithm();

    let mut session = DeviceSession::open(connector)?;
    let authorizer = SessionAuthorizer::new(slot);

    let parent = resolve(&mut session, parent_handle, &authorizer.attach_null())?;
    advance(stage);

    let auth = authorizer.attach(&parent, parent_auth);
    advance(stage);

    let loaded = session
        .import_private_key(&parent, &auth, &material)
        .map_err(|rc| command_error("import", parent_handle, rc))?;
    let public_size = loaded.key.public.len();
    let private_size = loaded.key.private.len();
    info!("Imported {algorithm} key (pub {public_size}, priv {private_size} bytes)");
    advance(stage);

    let bytes_written = sink.persist(&loaded.key)?;
    let destination = sink.destination();
    info!("Wrote {bytes_written} bytes to {destination}");
    advance(stage);

    if let Err(rc) = session.release(loaded.handle) {
        warn!("Failed to unload {}: {rc}", loaded.handle);
    }
    if let Err(err) = session.close() {
        warn!("{err}");
    }
    advance(stage);

    Ok(ImportReport {
        algorithm,
        parent: parent_handle,
        public_size,
        private_size,
        bytes_written,
        destination,
        key: loaded.key,
    })
}

fn advance(stage: &mut ImportStage) {
    if let Some(next) = stage.next() {
        debug!("Import stage {stage} -> {next}");
        *stage = next;
    }
}

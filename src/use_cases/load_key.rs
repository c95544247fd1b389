use tracing::{debug, info, warn};

use super::command_error;
use crate::domain::{resolve, DeviceSession, SessionAuthorizer};
use crate::error::KeyImportResult;
use crate::logic::decode;
use crate::model::{AuthSecret, Handle, PublicDescription, SessionSlot};
use crate::ports::DeviceConnector;

#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub parent_handle: Handle,
    pub parent_auth: AuthSecret,
    pub slot: SessionSlot,
}

impl Default for LoadRequest {
    fn default() -> Self {
        Self {
            parent_handle: Handle::DEMO_STORAGE_KEY,
            parent_auth: AuthSecret::demo_storage_key(),
            slot: SessionSlot::primary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Transient handle the key was loaded at. Unloaded again before the
    /// report is returned.
    pub handle: Handle,
    pub description: PublicDescription,
    pub public_size: usize,
    pub private_size: usize,
}

/// Load a persisted blob under its parent to prove it is usable
///
/// The blob is decoded strictly before any session is opened, so a corrupt
/// blob never reaches the trust root.
pub fn load_key<C: DeviceConnector>(
    connector: &C,
    request: LoadRequest,
    blob: &[u8],
) -> KeyImportResult<LoadReport> {
    let key = decode(blob)?;
    let description = key.public.describe()?;
    debug!(
        "Decoded {} key blob (pub {}, priv {} bytes)",
        description.algorithm(),
        key.public.len(),
        key.private.len()
    );

    let mut session = DeviceSession::open(connector)?;
    let authorizer = SessionAuthorizer::new(request.slot);
    let parent = resolve(
        &mut session,
        request.parent_handle,
        &authorizer.attach_null(),
    )?;
    let auth = authorizer.attach(&parent, request.parent_auth);

    let handle = session
        .load_key(&parent, &auth, &key)
        .map_err(|rc| command_error("load", request.parent_handle, rc))?;
    info!("Loaded {} key at {handle}", description.algorithm());

    if let Err(rc) = session.release(handle) {
        warn!("Failed to unload {handle}: {rc}");
    }
    if let Err(err) = session.close() {
        warn!("{err}");
    }

    Ok(LoadReport {
        handle,
        description,
        public_size: key.public.len(),
        private_size: key.private.len(),
    })
}

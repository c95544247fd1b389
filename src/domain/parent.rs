use tracing::debug;

use super::{DeviceSession, NullAuthorization};
use crate::error::{KeyImportError, KeyImportResult};
use crate::model::{Handle, PublicArea, ResponseCode};
use crate::ports::TrustRoot;

/// A storage key whose public area was read back from the trust root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParent {
    handle: Handle,
    public: PublicArea,
    name: Vec<u8>,
}

impl ResolvedParent {
    pub(crate) fn new(handle: Handle, public: PublicArea) -> Self {
        let name = public.name();
        Self {
            handle,
            public,
            name,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn public(&self) -> &PublicArea {
        &self.public
    }

    /// TPM name of the parent, binds wrapped children to it
    pub fn name(&self) -> &[u8] {
        &self.name
    }
}

/// Resolve the storage parent at `handle`
///
/// Reads the public area without touching trust-root state. A handle that
/// cannot be read, or that holds anything but a restricted decryption key,
/// is reported as [`KeyImportError::ParentNotFound`].
pub fn resolve<D: TrustRoot>(
    session: &mut DeviceSession<D>,
    handle: Handle,
    auth: &NullAuthorization,
) -> KeyImportResult<ResolvedParent> {
    let public = session
        .read_public(handle, auth)
        .map_err(|rc| KeyImportError::ParentNotFound { handle, rc })?;

    let not_a_parent = KeyImportError::ParentNotFound {
        handle,
        rc: ResponseCode::TYPE.with_handle(1),
    };
    let description = public.describe().map_err(|err| {
        debug!("Public area at {handle} does not parse: {err}");
        not_a_parent
    })?;
    if !description.attributes.is_storage_parent() {
        debug!(
            "Object at {handle} is not a storage key: {:?}",
            description.attributes
        );
        return Err(KeyImportError::ParentNotFound {
            handle,
            rc: ResponseCode::TYPE.with_handle(1),
        });
    }

    debug!("Resolved parent {handle} ({} byte public area)", public.len());
    Ok(ResolvedParent::new(handle, public))
}

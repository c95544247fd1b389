//! Scoped device session
//!
//! [`DeviceSession`] owns an open trust-root session for one run. Every
//! transient handle created through it is tracked, and dropping the session
//! unloads them and closes the session, whichever step failed.

use tracing::{debug, warn};

use crate::domain::{NullAuthorization, ParentAuthorization, ResolvedParent};
use crate::error::{KeyImportError, KeyImportResult};
use crate::model::{Handle, KeyMaterial, LoadedKey, ProtectedKey, PublicArea, ResponseCode};
use crate::ports::{DeviceConnector, DeviceResult, TrustRoot};

pub struct DeviceSession<D: TrustRoot> {
    device: D,
    transient: Vec<Handle>,
    closed: bool,
}

impl<D: TrustRoot> DeviceSession<D> {
    /// Open a session through `connector`
    ///
    /// # Errors
    ///
    /// Returns [`KeyImportError::DeviceInit`] with the device response code.
    pub fn open<C>(connector: &C) -> KeyImportResult<Self>
    where
        C: DeviceConnector<Device = D>,
    {
        let device = connector
            .open()
            .map_err(|rc| KeyImportError::DeviceInit { rc })?;
        debug!("Trust root session opened");

        Ok(Self {
            device,
            transient: Vec::new(),
            closed: false,
        })
    }

    pub fn read_public(
        &mut self,
        handle: Handle,
        auth: &NullAuthorization,
    ) -> DeviceResult<PublicArea> {
        self.device.read_public(handle, auth)
    }

    /// Import `material` under `parent`. The transient handle of the new
    /// object is released when the session ends.
    pub fn import_private_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        material: &KeyMaterial,
    ) -> DeviceResult<LoadedKey> {
        let loaded = self.device.import_private_key(parent, auth, material)?;
        self.track(loaded.handle);
        Ok(loaded)
    }

    pub fn load_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        key: &ProtectedKey,
    ) -> DeviceResult<Handle> {
        let handle = self.device.load_key(parent, auth, key)?;
        self.track(handle);
        Ok(handle)
    }

    /// Unload a tracked transient handle now instead of at session end
    pub fn release(&mut self, handle: Handle) -> DeviceResult<()> {
        self.transient.retain(|tracked| *tracked != handle);
        self.device.unload(handle)?;
        debug!("Unloaded transient handle {handle}");
        Ok(())
    }

    /// Transient handles still loaded through this session
    pub fn transient_handles(&self) -> &[Handle] {
        &self.transient
    }

    /// Unload the remaining handles and close the session
    ///
    /// Every handle is attempted even if one fails. The first failure is
    /// reported.
    pub fn close(mut self) -> KeyImportResult<()> {
        self.shutdown()
            .map_err(|rc| KeyImportError::Device {
                operation: "cleanup",
                rc,
            })
    }

    fn track(&mut self, handle: Handle) {
        debug!("Tracking transient handle {handle}");
        self.transient.push(handle);
    }

    fn shutdown(&mut self) -> Result<(), ResponseCode> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let mut first_failure = None;
        for handle in std::mem::take(&mut self.transient) {
            if let Err(rc) = self.device.unload(handle) {
                warn!("Failed to unload transient handle {handle}: {rc}");
                first_failure.get_or_insert(rc);
            }
        }
        if let Err(rc) = self.device.cleanup() {
            warn!("Failed to close trust root session: {rc}");
            first_failure.get_or_insert(rc);
        }
        debug!("Trust root session closed");

        first_failure.map_or(Ok(()), Err)
    }
}

impl<D: TrustRoot> Drop for DeviceSession<D> {
    fn drop(&mut self) {
        // Failures were already logged by shutdown
        let _ = self.shutdown();
    }
}

//! KeyLoader trait - capability to load a previously persisted protected key

use super::DeviceResult;
use crate::domain::{ParentAuthorization, ResolvedParent};
use crate::model::{Handle, ProtectedKey};

pub trait KeyLoader {
    /// Load `key` under `parent` and return its transient handle
    ///
    /// # Errors
    ///
    /// `TPM_RC_INTEGRITY` when the private area was not produced under this
    /// parent or was modified, plus the authorization failures of
    /// [`KeyImporter`](super::KeyImporter).
    fn load_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        key: &ProtectedKey,
    ) -> DeviceResult<Handle>;
}

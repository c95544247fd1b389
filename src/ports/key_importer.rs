//! KeyImporter trait - capability to wrap external key material

use super::DeviceResult;
use crate::domain::{ParentAuthorization, ResolvedParent};
use crate::model::{KeyMaterial, LoadedKey};

/// Capability to import plaintext private key material under a parent
///
/// The trust root wraps the material under the parent's seed, loads the
/// result as a transient object and hands back both the protected key and
/// the transient handle.
pub trait KeyImporter {
    /// Import RSA or ECC material under `parent`
    ///
    /// # Arguments
    ///
    /// * `parent` - The resolved storage parent
    /// * `auth` - Authorization bound to that parent
    /// * `material` - The key material to wrap
    ///
    /// # Returns
    ///
    /// The protected key and the transient handle it is loaded at
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The authorization names another handle or carries a wrong secret
    /// - The material is malformed for its algorithm
    /// - No transient object slot is free
    fn import_private_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        material: &KeyMaterial,
    ) -> DeviceResult<LoadedKey>;
}

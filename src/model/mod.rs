//! Domain types for trust-root key import
//!
//! These wrap primitives so that invariants (sizes, ranges, redaction of
//! secrets) are enforced once, at construction.

pub(crate) mod algorithm;
mod auth_secret;
mod handle;
mod key_material;
mod object_attributes;
mod protected_key;
mod public_area;
mod response_code;
mod slot;
mod stage;

pub use algorithm::{Algorithm, AlgorithmError, EccCurve};
pub use auth_secret::{AuthSecret, AuthSecretError};
pub use handle::{Handle, HandleError};
pub use key_material::{EccKeyMaterial, KeyMaterial, KeyMaterialError, RsaKeyMaterial};
pub use object_attributes::ObjectAttributes;
pub use protected_key::{LoadedKey, PrivateArea, ProtectedKey};
pub use public_area::{
    AreaError, PublicArea, PublicDescription, PublicParameters, SymmetricDefinition,
};
pub use response_code::ResponseCode;
pub use slot::{SessionSlot, SlotError};
pub use stage::ImportStage;

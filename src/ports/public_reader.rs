//! PublicReader trait - capability to read the public area of an object

use super::DeviceResult;
use crate::domain::NullAuthorization;
use crate::model::{Handle, PublicArea};

pub trait PublicReader {
    /// Read the public area of the object at `handle`
    ///
    /// Reading a public area needs no secret, so only a
    /// [`NullAuthorization`] is accepted. The trust root state is not
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns `TPM_RC_HANDLE` (with handle position) if nothing is loaded at
    /// `handle`.
    fn read_public(&mut self, handle: Handle, auth: &NullAuthorization)
        -> DeviceResult<PublicArea>;
}

use super::{DeviceResult, TrustRoot};

/// Capability to open a session with a trust root
pub trait DeviceConnector {
    type Device: TrustRoot;

    /// Open the transport and start a session.
    ///
    /// # Errors
    ///
    /// Returns the device response code when the trust root is unreachable or
    /// refuses to start.
    fn open(&self) -> DeviceResult<Self::Device>;
}

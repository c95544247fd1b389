use super::DeviceResult;

/// Capability to end a device session
pub trait SessionCloser {
    /// Release every session resource. Called once, after all tracked
    /// transient handles have been unloaded.
    fn cleanup(&mut self) -> DeviceResult<()>;
}

use super::DeviceResult;
use crate::model::Handle;

/// Capability to flush a transient object
pub trait HandleUnloader {
    fn unload(&mut self, handle: Handle) -> DeviceResult<()>;
}

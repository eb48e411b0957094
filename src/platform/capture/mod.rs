// Camera capture abstraction
// The device itself belongs to the host application; the pipeline only opens and closes it

pub mod host;

pub use host::HostCapture;

use crate::models::capture::{CaptureConfig, CaptureResult};
use async_trait::async_trait;

/// Video source feeding the pose model
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Acquire the device at the requested resolution
    async fn open(&mut self, config: &CaptureConfig) -> CaptureResult<()>;

    /// Release the device
    async fn close(&mut self) -> CaptureResult<()>;

    /// Check if the device is currently open
    fn is_open(&self) -> bool;
}

// Data structures for the camera feeding the pose model

use serde::{Deserialize, Serialize};

/// Requested capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Error types for capture device operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Capture device not found: {0}")]
    DeviceNotFound(String),

    #[error("Capture device already open")]
    AlreadyOpen,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

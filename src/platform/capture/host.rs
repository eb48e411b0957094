// Capture device owned by the embedding application

use super::CaptureSource;
use crate::models::capture::{CaptureConfig, CaptureError, CaptureResult};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Permission {
    Granted,
    Denied(String),
    Missing(String),
}

/// A camera the host has already negotiated access to.
///
/// Opening reports the permission outcome the host observed, so a denied
/// camera stops the pipeline before it starts.
#[derive(Debug, Clone)]
pub struct HostCapture {
    permission: Permission,
    active: Option<CaptureConfig>,
}

impl HostCapture {
    pub fn granted() -> Self {
        Self {
            permission: Permission::Granted,
            active: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            permission: Permission::Denied(reason.into()),
            active: None,
        }
    }

    /// The host found no camera matching `device`
    pub fn missing(device: impl Into<String>) -> Self {
        Self {
            permission: Permission::Missing(device.into()),
            active: None,
        }
    }

    /// Resolution in use while open
    pub fn resolution(&self) -> Option<CaptureConfig> {
        self.active
    }
}

#[async_trait]
impl CaptureSource for HostCapture {
    async fn open(&mut self, config: &CaptureConfig) -> CaptureResult<()> {
        match &self.permission {
            Permission::Granted => {}
            Permission::Denied(reason) => {
                return Err(CaptureError::PermissionDenied(reason.clone()))
            }
            Permission::Missing(device) => {
                return Err(CaptureError::DeviceNotFound(device.clone()))
            }
        }
        if self.active.is_some() {
            return Err(CaptureError::AlreadyOpen);
        }

        self.active = Some(*config);
        tracing::debug!(width = config.width, height = config.height, "Capture opened");
        Ok(())
    }

    async fn close(&mut self) -> CaptureResult<()> {
        self.active = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.active.is_some()
    }
}

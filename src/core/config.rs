use crate::models::capture::CaptureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Knee-angle thresholds for the squat detector (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    /// Either knee below this enters the squat
    pub enter_below_deg: f32,
    /// Both knees above this complete the rep
    pub exit_above_deg: f32,
}

/// Elbow-angle thresholds for the curl detectors (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlThresholds {
    pub enter_below_deg: f32,
    pub exit_above_deg: f32,
}

/// Ankle-distance thresholds for the leg-spread detector (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegSpreadThresholds {
    pub open_above_px: f32,
    pub close_below_px: f32,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            enter_below_deg: 90.0,
            exit_above_deg: 160.0,
        }
    }
}

impl Default for CurlThresholds {
    fn default() -> Self {
        Self {
            enter_below_deg: 45.0,
            exit_above_deg: 160.0,
        }
    }
}

impl Default for LegSpreadThresholds {
    fn default() -> Self {
        Self {
            open_above_px: 80.0,
            close_below_px: 40.0,
        }
    }
}

/// Rep counter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum keypoint score a detector trusts (0.0-1.0)
    pub confidence_threshold: f32,
    /// Fold reflex joint angles into [0, 180] before comparing thresholds
    pub fold_reflex_angles: bool,
    pub squat: SquatThresholds,
    pub curl: CurlThresholds,
    pub leg_spread: LegSpreadThresholds,
    /// Frames a lone arm/leg completion may wait for its counterpart; unbounded when absent
    pub jumping_jack_window_frames: Option<u32>,
    /// Resolution requested from the capture device
    pub capture: CaptureConfig,
    /// Buffered frame reports per presentation subscriber
    pub report_channel_capacity: usize,
    /// Number of initial poses logged at debug level
    pub log_first_poses: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            fold_reflex_angles: true,
            squat: SquatThresholds::default(),
            curl: CurlThresholds::default(),
            leg_spread: LegSpreadThresholds::default(),
            jumping_jack_window_frames: None,
            capture: CaptureConfig::default(),
            report_channel_capacity: 16,
            log_first_poses: 30,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl Config {
    /// Load configuration from file, creating it with defaults if it doesn't exist
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Load from the per-user location
    pub fn load_default() -> ConfigResult<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "confidence threshold {} must be between 0.0 and 1.0",
                self.confidence_threshold
            )));
        }

        validate_angle_band(
            "squat",
            self.squat.enter_below_deg,
            self.squat.exit_above_deg,
        )?;
        validate_angle_band("curl", self.curl.enter_below_deg, self.curl.exit_above_deg)?;

        let legs = &self.leg_spread;
        if legs.close_below_px <= 0.0 || legs.close_below_px >= legs.open_above_px {
            return Err(ConfigError::Invalid(format!(
                "leg spread close threshold {} must be positive and below open threshold {}",
                legs.close_below_px, legs.open_above_px
            )));
        }

        if self.jumping_jack_window_frames == Some(0) {
            return Err(ConfigError::Invalid(
                "jumping jack window must be at least one frame".to_string(),
            ));
        }

        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "capture resolution {}x{} must be non-zero",
                self.capture.width, self.capture.height
            )));
        }

        if self.report_channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "report channel capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the per-user configuration file path
    pub fn default_path() -> ConfigResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDirectory)?;

        let mut path = PathBuf::from(home);
        path.push(".rep_counter");
        path.push("settings.json");

        Ok(path)
    }
}

// Hysteresis needs a gap: entering below `enter`, leaving above `exit`.
fn validate_angle_band(name: &str, enter: f32, exit: f32) -> ConfigResult<()> {
    let in_range = |deg: f32| deg > 0.0 && deg <= 180.0;
    if !in_range(enter) || !in_range(exit) || enter >= exit {
        return Err(ConfigError::Invalid(format!(
            "{} thresholds must satisfy 0 < enter ({}) < exit ({}) <= 180",
            name, enter, exit
        )));
    }
    Ok(())
}

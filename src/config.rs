//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration:
//!
//! ```toml
//! [frame]
//! target_fps = 30
//!
//! [tasks]
//! ttl_secs = 3
//!
//! [logging]
//! level = "debug"
//! file = "dungeon-ui.log"
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frame loop and terminal settings.
    pub frame: FrameConfig,
    /// Background task timings.
    pub tasks: TaskConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Frame loop and terminal settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target frames per second for the frame loop.
    pub target_fps: u32,
    /// How long the input thread waits for events before checking shutdown.
    pub input_poll_timeout_ms: u64,
    /// Capture mouse events.
    pub enable_mouse: bool,
    /// Draw on the alternate screen.
    pub alternate_screen: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout_ms: 10,
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

impl FrameConfig {
    /// Duration of one frame at the target rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }

    /// Input poll timeout.
    pub const fn input_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.input_poll_timeout_ms)
    }
}

/// Background task timings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Time to live of expiring overlay entries.
    pub ttl_secs: u64,
    /// Pause between eviction passes.
    pub eviction_interval_ms: u64,
    /// Pause between lock-wait retries.
    pub retry_interval_ms: u64,
    /// Delay before transient markers are cleared.
    pub hit_clear_secs: u64,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3,
            eviction_interval_ms: 250,
            retry_interval_ms: 50,
            hit_clear_secs: 2,
        }
    }
}

impl TaskConfig {
    /// Entry time to live.
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Eviction pass interval.
    pub const fn eviction_interval(&self) -> Duration {
        Duration::from_millis(self.eviction_interval_ms)
    }

    /// Lock-wait retry interval.
    pub const fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Marker clear delay.
    pub const fn hit_clear(&self) -> Duration {
        Duration::from_secs(self.hit_clear_secs)
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `dungeon_ui=debug`.
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: None }
    }
}

impl UiConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: path.display().to_string(), source }),
        }
    }
}

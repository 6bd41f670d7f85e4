// Configuration management
//
// Settings the host can tune without recompiling: clock batching for the
// cooperative run loop and screenshot output. Persisted as TOML in the
// working directory; built-in defaults apply when no file exists.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
const CONFIG_FILE: &str = "famicore.toml";

/// Errors produced while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),
    /// TOML syntax or shape error
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Machine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NesConfig {
    /// Clock batching for the cooperative run loop
    pub clock: ClockConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Clock batching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Master steps per batch before yielding to the host
    pub yield_interval: u32,

    /// How long to yield between batches, in milliseconds
    pub yield_delay_ms: u64,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written into
    pub directory: PathBuf,

    /// Include a timestamp in generated filenames
    pub include_timestamp: bool,
}

impl Default for NesConfig {
    fn default() -> Self {
        NesConfig {
            clock: ClockConfig {
                // One NTSC frame of master steps per batch
                yield_interval: 341 * 262,
                yield_delay_ms: 1,
            },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
        }
    }
}

impl NesConfig {
    /// Load configuration from the default file, falling back to defaults
    ///
    /// A missing or unreadable file is not an error; the defaults apply.
    pub fn load_or_default() -> Self {
        Self::load_from(CONFIG_FILE).unwrap_or_default()
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    /// I/O errors reading the file or TOML errors parsing it.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    /// I/O errors writing the file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_FILE)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    /// I/O errors writing the file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

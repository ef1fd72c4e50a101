//! # Configuration Utilities
//!
//! Optional TOML configuration for the `steg` binary. Every field has a
//! default, so a missing file or an empty file both behave the same.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [password]
//! env_var = "STEG_PASSWORD"
//! ```

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable consulted for a password when none is given on the command line.
pub const DEFAULT_PASSWORD_ENV: &str = "STEG_PASSWORD";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegConfig = load_config("steg.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration for the `steg` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegConfig {
    pub logging: LoggingConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Where to look for a password when `--password` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub env_var: String,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}

impl PasswordConfig {
    /// An explicit password wins; otherwise use the configured environment
    /// variable if it is set and non-empty. `None` means no encryption.
    pub fn resolve(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| {
            std::env::var(&self.env_var)
                .ok()
                .filter(|value| !value.is_empty())
        })
    }
}

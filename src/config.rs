//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/matprint/matprint.toml`
//! 3. Local config: explicit path, else `./.matprint.toml`
//! 4. Environment variables: `MATPRINT_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::printer::{DEFAULT_PRECISION, DEFAULT_WIDTH_BUFFER, MAX_TUNABLE};
use crate::application::ApplicationError;

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".matprint.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MATPRINT";

/// Formatting settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Digits after the decimal point
    pub precision: usize,
    /// Extra spaces before the second and third column
    pub width_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            width_buffer: DEFAULT_WIDTH_BUFFER,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Signed and optional so that "not specified" inherits and negative values
/// can be reported instead of failing deep inside serde.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub precision: Option<i64>,
    pub width_buffer: Option<i64>,
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Accept a tunable only within `0..=MAX_TUNABLE`.
pub fn to_tunable(key: &str, value: i64) -> Result<usize, ApplicationError> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_TUNABLE)
        .ok_or_else(|| ApplicationError::Config {
            message: format!(
                "{} must be an integer between 0 and {}, got {}",
                key, MAX_TUNABLE, value
            ),
        })
}

/// Get the XDG config directory for matprint.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "matprint").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("matprint.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        Ok(Self {
            precision: match overlay.precision {
                Some(v) => to_tunable("precision", v)?,
                None => self.precision,
            },
            width_buffer: match overlay.width_buffer {
                Some(v) => to_tunable("width_buffer", v)?,
                None => self.width_buffer,
            },
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file. It must exist when given.
    ///   Without it, `./.matprint.toml` is used if present.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?)?;
            }
        }

        // 3. Local config
        match local {
            Some(path) => {
                if !path.is_file() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                debug!("local config: {}", path.display());
                current = current.merge_with(&load_raw_settings(path)?)?;
            }
            None => {
                let path = local_config_path(Path::new("."));
                if path.is_file() {
                    debug!("local config: {}", path.display());
                    current = current.merge_with(&load_raw_settings(&path)?)?;
                }
            }
        }

        // 4. Environment variables
        current.apply_env_overrides(None)
    }

    /// Apply `MATPRINT_*` environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment, for tests.
    pub fn apply_env_overrides(
        self,
        source: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            precision: get_optional_int(&config, "precision")?,
            width_buffer: get_optional_int(&config, "width_buffer")?,
        };
        self.merge_with(&raw)
    }

    /// Commented TOML template for `config init`.
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            "# matprint configuration\n\
             \n\
             # Digits after the decimal point\n\
             precision = {}\n\
             \n\
             # Extra spaces before the second and third column\n\
             width_buffer = {}\n",
            defaults.precision, defaults.width_buffer
        )
    }
}

fn get_optional_int(config: &Config, key: &str) -> Result<Option<i64>, ApplicationError> {
    match config.get_int(key) {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.precision, 3);
        assert_eq!(s.width_buffer, 2);
    }

    #[test]
    fn test_merge_keeps_unspecified() {
        let raw = RawSettings {
            precision: Some(5),
            width_buffer: None,
        };
        let merged = Settings::default().merge_with(&raw).unwrap();
        assert_eq!(merged.precision, 5);
        assert_eq!(merged.width_buffer, 2);
    }

    #[test]
    fn test_merge_rejects_negative() {
        let raw = RawSettings {
            precision: None,
            width_buffer: Some(-1),
        };
        let err = Settings::default().merge_with(&raw).unwrap_err();
        assert!(err.to_string().contains("width_buffer"));
    }

    #[test]
    fn test_env_overrides() {
        let mut env = Map::new();
        env.insert("MATPRINT_PRECISION".to_string(), "5".to_string());
        env.insert("MATPRINT_WIDTH_BUFFER".to_string(), "0".to_string());
        let s = Settings::default().apply_env_overrides(Some(env)).unwrap();
        assert_eq!(s.precision, 5);
        assert_eq!(s.width_buffer, 0);
    }

    #[test]
    fn test_to_tunable_bounds() {
        assert_eq!(to_tunable("precision", 0).unwrap(), 0);
        assert_eq!(to_tunable("precision", MAX_TUNABLE as i64).unwrap(), MAX_TUNABLE);
        assert!(to_tunable("precision", MAX_TUNABLE as i64 + 1).is_err());
        assert!(to_tunable("width_buffer", i64::MAX).is_err());
    }

    #[test]
    fn test_env_overrides_reject_negative() {
        let mut env = Map::new();
        env.insert("MATPRINT_PRECISION".to_string(), "-2".to_string());
        assert!(Settings::default().apply_env_overrides(Some(env)).is_err());
    }

    #[test]
    fn test_template_round_trips_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}

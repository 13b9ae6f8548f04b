// swift-build-report - config.rs
//
// Platform-appropriate config directory resolution and optional
// config.toml loading. Mirrors the `directories`-based resolution the
// teacher crate uses for its own platform paths, narrowed to the single
// flat preferences file this CLI needs.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

/// Resolved, defaulted configuration used by a single CLI invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub default_format: Option<String>,
    pub color: bool,
    pub max_input_bytes: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            default_format: None,
            color: true,
            max_input_bytes: constants::DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// On-disk shape of `config.toml`. Every field is optional and defaulted so
/// a partial or empty file is always valid.
#[derive(Debug, Default, Deserialize)]
struct CliConfigFile {
    #[serde(default)]
    logging: LoggingSection,
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    limits: LimitsSection,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingSection {
    #[serde(default)]
    level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputSection {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    color: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LimitsSection {
    #[serde(default)]
    max_input_bytes: Option<u64>,
}

impl CliConfig {
    /// Resolve the platform config directory, read `config.toml` if present,
    /// and return a populated config. A missing file is not an error. A
    /// malformed file returns a `ConfigError` for the caller to log as a
    /// warning; the CLI proceeds with defaults regardless.
    pub fn load() -> (Self, Option<ConfigError>) {
        let path = match config_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine platform config directory, using defaults");
                return (Self::default(), None);
            }
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Self::default(), None),
            Err(e) => {
                return (
                    Self::default(),
                    Some(ConfigError::Io { path, source: e }),
                )
            }
        };

        match toml::from_str::<CliConfigFile>(&contents) {
            Ok(file) => (
                Self {
                    log_level: file.logging.level,
                    default_format: file.output.format,
                    color: file.output.color.unwrap_or(true),
                    max_input_bytes: file
                        .limits
                        .max_input_bytes
                        .unwrap_or(constants::DEFAULT_MAX_INPUT_BYTES),
                },
                None,
            ),
            Err(e) => (Self::default(), Some(ConfigError::TomlParse { path, source: e })),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", constants::APP_ID)
        .map(|dirs| dirs.config_dir().join(constants::CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_overrides() {
        let cfg = CliConfig::default();
        assert!(cfg.log_level.is_none());
        assert!(cfg.default_format.is_none());
        assert!(cfg.color);
        assert_eq!(cfg.max_input_bytes, constants::DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_limits_section_overrides_max_input_bytes() {
        let file: CliConfigFile = toml::from_str("[limits]\nmax_input_bytes = 1024\n").unwrap();
        assert_eq!(file.limits.max_input_bytes, Some(1024));
    }

    #[test]
    fn test_partial_toml_deserializes_with_defaults() {
        let file: CliConfigFile = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(file.logging.level, Some("debug".to_string()));
        assert!(file.output.format.is_none());
    }

    #[test]
    fn test_empty_toml_deserializes() {
        let file: CliConfigFile = toml::from_str("").unwrap();
        assert!(file.logging.level.is_none());
        assert!(file.output.format.is_none());
    }
}

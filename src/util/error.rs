// swift-build-report - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all swift-build-report operations.
/// Errors are categorised by the subsystem that produced them.
///
/// Most parse-time anomalies are not represented here at all -- an
/// unrecognized line, a bad duration, an unparsed dependency line become a
/// `Diagnostic` entry or are silently skipped per the dialect's rules.
/// These variants exist only for the handful of genuinely fatal,
/// non-diagnostic failures.
#[derive(Debug)]
pub enum BuildReportError {
    /// Dialect parsing hit an unrecoverable condition (e.g. input exceeding
    /// the configured maximum size).
    Parse(ParseError),

    /// The SPM `dump-package` JSON decode failed at the top level.
    Spm(SpmError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Output rendering failed.
    Format(FormatError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// A CLI argument failed validation (unknown `--format`, bad `--format-hint`).
    Usage(String),
}

impl fmt::Display for BuildReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Spm(e) => write!(f, "SPM error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Format(e) => write!(f, "Output error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Usage(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for BuildReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Spm(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Usage(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to dialect parsing that cannot be represented as a
/// `Diagnostic`.
#[derive(Debug)]
pub enum ParseError {
    /// Input exceeds the configured maximum size.
    InputTooLarge { size: u64, max_size: u64 },

    /// Input bytes are not valid UTF-8.
    InvalidEncoding { source: std::string::FromUtf8Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTooLarge { size, max_size } => write!(
                f,
                "input is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
            Self::InvalidEncoding { source } => {
                write!(f, "invalid UTF-8 encoding: {source}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for BuildReportError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// SPM errors
// ---------------------------------------------------------------------------

/// Errors related to SPM-metadata parsing.
#[derive(Debug)]
pub enum SpmError {
    /// The `dump-package` input did not decode as JSON at all.
    JsonDecode { source: serde_json::Error },
}

impl fmt::Display for SpmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonDecode { source } => {
                write!(f, "Failed to parse Package.swift JSON: {source}")
            }
        }
    }
}

impl std::error::Error for SpmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JsonDecode { source } => Some(source),
        }
    }
}

impl From<SpmError> for BuildReportError {
    fn from(e: SpmError) -> Self {
        Self::Spm(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for BuildReportError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Errors related to output rendering.
#[derive(Debug)]
pub enum FormatError {
    /// JSON serialisation failed.
    Json { source: serde_json::Error },

    /// I/O error writing the report to its destination.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "JSON rendering error: {source}"),
            Self::Io { path, source } => {
                write!(f, "Output I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<FormatError> for BuildReportError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

/// Convenience type alias for swift-build-report results.
pub type Result<T> = std::result::Result<T, BuildReportError>;

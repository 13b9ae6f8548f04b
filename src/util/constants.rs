// swift-build-report - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "swift-build-report";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "swift-build-report";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input limits
// =============================================================================

/// Default maximum input size accepted from stdin or a file argument, in
/// bytes. Larger input produces a `ParseError::InputTooLarge` rather than
/// an unbounded in-memory buffer.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024; // 256 MB

/// Size of each stdin read chunk while accumulating input up to the max.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 64 * 1024; // 64 KB

// =============================================================================
// Report rendering
// =============================================================================

/// Number of diagnostics included by the `summary` output format.
pub const SUMMARY_DIAGNOSTIC_LIMIT: usize = 10;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

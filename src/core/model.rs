// swift-build-report - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no CLI,
// no platform dependencies (Core depends on std + serde + chrono only).
//
// These types are the shared vocabulary across all dialect parsers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// BuildFormat
// =============================================================================

/// The detected (or forced) dialect a log was parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildFormat {
    Xcode,
    Swift,
    Spm,
    Unknown,
}

impl std::fmt::Display for BuildFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuildFormat::Xcode => "xcode",
            BuildFormat::Swift => "swift",
            BuildFormat::Spm => "spm",
            BuildFormat::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// =============================================================================
// BuildStatus
// =============================================================================

/// Overall outcome of the build/command represented by the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failed,
    Unknown,
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuildStatus::Success => "success",
            BuildStatus::Failed => "failed",
            BuildStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// =============================================================================
// DiagnosticSeverity
// =============================================================================

/// Normalised diagnostic severity, ordered from most to least severe.
///
/// `Critical` is reserved: no dialect parser in this crate ever constructs
/// it, but it participates in `error_count`/status derivation alongside
/// `Error` so a future dialect can emit it without changing the invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Critical,
    Error,
    Warning,
    Info,
}

impl DiagnosticSeverity {
    /// Whether this severity counts toward `BuildMetrics::error_count`.
    pub fn is_error_like(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error | DiagnosticSeverity::Critical)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Critical => "critical",
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// DiagnosticCategory
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Build,
    Compilation,
    Linking,
    Dependency,
    Other,
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single error/warning/note extracted from the log.
///
/// Invariants: `message` is non-empty and never contains the leading
/// severity label; when `location` is present it is the exact substring
/// preceding the severity marker; `line_number >= 1` and `column >= 1`
/// when present; `file_path`, when present, is the prefix of `location`
/// up to the first positional colon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub category: DiagnosticCategory,
    pub message: String,
    pub location: Option<String>,
    pub file_path: Option<PathBuf>,
    pub line_number: Option<u32>,
    pub column: Option<u32>,
}

// =============================================================================
// BuildMetrics
// =============================================================================

/// Invariant: `error_count`/`warning_count`/`info_count` equal the counts of
/// diagnostics at the corresponding severities (`error` and `critical` both
/// feed `error_count`). `compiled_files` has no duplicates; order is
/// first-occurrence order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetrics {
    pub error_count: u32,
    pub warning_count: u32,
    pub info_count: u32,
    pub compiled_files: Vec<String>,
    pub target_count: u32,
    pub total_duration: Option<f64>,
}

impl BuildMetrics {
    /// Recompute error/warning/info counts from a diagnostics slice.
    /// The caller owns `compiled_files`/`target_count`/`total_duration`.
    pub fn recount(&mut self, diagnostics: &[Diagnostic]) {
        self.error_count = 0;
        self.warning_count = 0;
        self.info_count = 0;
        for d in diagnostics {
            match d.severity {
                DiagnosticSeverity::Error | DiagnosticSeverity::Critical => self.error_count += 1,
                DiagnosticSeverity::Warning => self.warning_count += 1,
                DiagnosticSeverity::Info => self.info_count += 1,
            }
        }
    }

    /// Append `basename` to `compiled_files` if not already present.
    pub fn add_compiled_file(&mut self, basename: String) {
        if !self.compiled_files.contains(&basename) {
            self.compiled_files.push(basename);
        }
    }
}

// =============================================================================
// BuildTiming
// =============================================================================

/// Invariant: if both endpoints are present, `end_time >= start_time`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTiming {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_duration: f64,
}

// =============================================================================
// SPM info
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    SourceControl,
    Binary,
    Registry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpmTarget {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpmDependency {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
    pub url: Option<String>,
}

/// Closed struct standing in for a heterogeneous `spmInfo` mapping. Only
/// populated for the SPM `dump-package` sub-case. Serializes as a free-form
/// JSON object for wire compatibility.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpmInfo {
    pub command: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<SpmTarget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<SpmDependency>>,
}

// =============================================================================
// ParsedBuildResult
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBuildResult {
    pub format: BuildFormat,
    pub status: BuildStatus,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: BuildMetrics,
    pub timing: BuildTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spm_info: Option<SpmInfo>,
}

impl ParsedBuildResult {
    pub fn unknown() -> Self {
        Self {
            format: BuildFormat::Unknown,
            status: BuildStatus::Unknown,
            diagnostics: Vec::new(),
            metrics: BuildMetrics::default(),
            timing: BuildTiming::default(),
            spm_info: None,
        }
    }

    /// Derive final status per the error-handling design: any error-like
    /// diagnostic forces `Failed`; otherwise an unresolved `Unknown` status
    /// becomes `Success`. A status a dialect parser already forced to
    /// `Failed`/`Success` via an explicit marker is left untouched unless
    /// error diagnostics are present (which always win).
    pub fn finalize_status(&mut self) {
        self.metrics.recount(&self.diagnostics);
        if self.metrics.error_count > 0 {
            self.status = BuildStatus::Failed;
        } else if self.status == BuildStatus::Unknown {
            self.status = BuildStatus::Success;
        }
    }
}

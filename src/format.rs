// swift-build-report - format.rs
//
// Output rendering: five formats sharing one `ParsedBuildResult` input.
// Pure string-producing functions; no I/O. The CLI layer owns writing the
// rendered string to stdout or `--output`.

use crate::core::model::ParsedBuildResult;
use crate::util::constants::SUMMARY_DIAGNOSTIC_LIMIT;
use crate::util::error::FormatError;
use serde::Serialize;

/// Output format selected via `--format/-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Summary,
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown format '{other}' (expected text|json|summary|compact)")),
        }
    }
}

/// Render `result` in the requested format. `minimal` overrides every other
/// format choice per the CLI's `--minimal` flag. `color` only affects `text`.
pub fn render(
    result: &ParsedBuildResult,
    format: OutputFormat,
    minimal: bool,
    color: bool,
) -> Result<String, FormatError> {
    if minimal {
        return Ok(render_minimal(result));
    }
    match format {
        OutputFormat::Text => Ok(render_text(result, color)),
        OutputFormat::Json => render_json(result),
        OutputFormat::Summary => Ok(render_summary(result)),
        OutputFormat::Compact => render_compact(result),
    }
}

/// ANSI-wrap `text` in `code` when `color` is enabled, otherwise pass it through.
fn paint(color: bool, code: &str, text: &str) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn severity_code(severity: crate::core::model::DiagnosticSeverity) -> &'static str {
    use crate::core::model::DiagnosticSeverity::*;
    match severity {
        Critical | Error => "31",
        Warning => "33",
        Info => "36",
    }
}

fn render_text(result: &ParsedBuildResult, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Format:   {}\n", result.format));
    let status_label = paint(
        color,
        if result.status == crate::core::model::BuildStatus::Failed { "31" } else { "32" },
        &result.status.to_string(),
    );
    out.push_str(&format!("Status:   {status_label}\n"));
    out.push_str(&format!(
        "Errors:   {}  Warnings: {}  Info: {}\n",
        result.metrics.error_count, result.metrics.warning_count, result.metrics.info_count
    ));
    out.push_str(&format!("Targets:  {}\n", result.metrics.target_count));
    if let Some(duration) = result.metrics.total_duration {
        out.push_str(&format!("Duration: {duration:.1}s\n"));
    }
    if !result.metrics.compiled_files.is_empty() {
        out.push_str(&format!("\nCompiled files ({}):\n", result.metrics.compiled_files.len()));
        for file in &result.metrics.compiled_files {
            out.push_str(&format!("  {file}\n"));
        }
    }
    if !result.diagnostics.is_empty() {
        out.push_str(&format!("\nDiagnostics ({}):\n", result.diagnostics.len()));
        for d in &result.diagnostics {
            let severity = paint(color, severity_code(d.severity), &d.severity.to_string());
            let location = d.location.as_deref().unwrap_or("");
            if location.is_empty() {
                out.push_str(&format!("  [{severity}] {}\n", d.message));
            } else {
                out.push_str(&format!("  [{severity}] {location}: {}\n", d.message));
            }
        }
    }
    if let Some(info) = &result.spm_info {
        out.push_str(&format!("\nSPM command: {}\n", info.command));
        if let Some(name) = &info.package_name {
            out.push_str(&format!("Package: {name}\n"));
        }
        if let Some(deps) = &info.dependencies {
            out.push_str(&format!("Dependencies ({}):\n", deps.len()));
            for dep in deps {
                out.push_str(&format!("  {} {}\n", dep.name, dep.version));
            }
        }
    }
    out
}

fn render_json(result: &ParsedBuildResult) -> Result<String, FormatError> {
    serde_json::to_string_pretty(result).map_err(|source| FormatError::Json { source })
}

fn render_summary(result: &ParsedBuildResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("format: {}\n", result.format));
    out.push_str(&format!("status: {}\n", result.status));
    out.push_str(&format!("errors: {}\n", result.metrics.error_count));
    out.push_str(&format!("warnings: {}\n", result.metrics.warning_count));
    out.push_str(&format!("files: {}\n", result.metrics.compiled_files.len()));
    out.push_str(&format!("targets: {}\n", result.metrics.target_count));
    for d in result.diagnostics.iter().take(SUMMARY_DIAGNOSTIC_LIMIT) {
        out.push_str(&format!("- [{}] {}\n", d.severity, d.message));
    }
    let remaining = result.diagnostics.len().saturating_sub(SUMMARY_DIAGNOSTIC_LIMIT);
    if remaining > 0 {
        out.push_str(&format!("... and {remaining} more\n"));
    }
    out
}

#[derive(Serialize)]
struct CompactReport {
    format: String,
    status: String,
    errors: u32,
    warnings: u32,
    files: usize,
    duration: f64,
}

fn render_compact(result: &ParsedBuildResult) -> Result<String, FormatError> {
    let report = CompactReport {
        format: result.format.to_string(),
        status: result.status.to_string(),
        errors: result.metrics.error_count,
        warnings: result.metrics.warning_count,
        files: result.metrics.compiled_files.len(),
        duration: result.metrics.total_duration.unwrap_or(result.timing.total_duration),
    };
    serde_json::to_string(&report).map_err(|source| FormatError::Json { source })
}

fn render_minimal(result: &ParsedBuildResult) -> String {
    let duration = result.metrics.total_duration.unwrap_or(result.timing.total_duration);
    format!(
        "{} | ERRORS: {} | WARNINGS: {} | FILES: {} | DURATION: {:.1}s",
        result.status.to_string().to_uppercase(),
        result.metrics.error_count,
        result.metrics.warning_count,
        result.metrics.compiled_files.len(),
        duration
    )
}

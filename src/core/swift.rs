// swift-build-report - core/swift.rs
//
// Swift/SPM-build dialect parser: reduces `swift build`/`swift test`
// console output into a ParsedBuildResult.

use crate::core::diagnostic::parse_diagnostic_line;
use crate::core::model::{BuildFormat, BuildStatus, DiagnosticCategory, ParsedBuildResult};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn duration_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"\(([0-9.]+)s\)").unwrap(),
            Regex::new(r"\[([0-9.]+)s\]").unwrap(),
            Regex::new(r"(?s)completed.*?([0-9.]+)s").unwrap(),
            Regex::new(r"([0-9]+\.[0-9]+)s(\s|$)").unwrap(),
            Regex::new(r"([0-9]+)s(\s|$)").unwrap(),
        ]
    })
}

/// Best-effort parse of `input` as `swift build`/`swift test` console output.
pub fn parse(input: &str) -> ParsedBuildResult {
    let mut result = ParsedBuildResult::unknown();
    result.format = BuildFormat::Swift;

    let mut targets: BTreeSet<String> = BTreeSet::new();
    let mut max_duration: f64 = 0.0;
    let mut status_set = false;

    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = (idx as u32) + 1;
        let lower = line.to_lowercase();

        // Status: first pass wins, subject to the error-count override below.
        if !status_set {
            if lower.contains("build complete!") || lower.contains("build complete") || line.contains("BUILD SUCCEEDED") {
                result.status = BuildStatus::Success;
                status_set = true;
            } else if lower.contains("build failed") || line.contains("BUILD FAILED") || lower.contains("error: build failed") {
                result.status = BuildStatus::Failed;
                status_set = true;
            }
        }

        // Diagnostics.
        if lower.contains(": error:") || lower.starts_with("error:") {
            push_diagnostic(&mut result, line, line_number);
        } else if lower.contains(": warning:") || lower.starts_with("warning:") {
            push_diagnostic(&mut result, line, line_number);
        } else if lower.contains(": note:") || lower.starts_with("note:") {
            push_diagnostic(&mut result, line, line_number);
        }

        // Compiled files.
        if line.starts_with("Compiling") && line.contains(".swift") {
            if let Some(tok) = line.split_whitespace().find(|t| t.ends_with(".swift")) {
                let basename = tok.rsplit(['/', '\\']).next().unwrap_or(tok).to_string();
                result.metrics.add_compiled_file(basename);
            }
        }

        // Duration: maximum observed across the entire input.
        for pattern in duration_patterns() {
            if let Some(caps) = pattern.captures(line) {
                if let Some(val) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                    if val > max_duration {
                        max_duration = val;
                    }
                }
            }
        }

        // Targets: token after "Linking " contributes to a set.
        if let Some(rest) = line.strip_prefix("Linking ") {
            let target = rest.trim().to_string();
            if !target.is_empty() {
                targets.insert(target);
            }
        }
    }

    result.timing.total_duration = max_duration;
    result.metrics.total_duration = Some(max_duration);
    result.metrics.target_count = targets.len() as u32;

    result.finalize_status();
    result
}

fn push_diagnostic(result: &mut ParsedBuildResult, line: &str, line_number: u32) {
    if let Some(mut d) = parse_diagnostic_line(line, DiagnosticCategory::Compilation) {
        if d.line_number.is_none() {
            // No numeric suffix in `location`, so fall back to the
            // in-stream line index rather than a source file line number.
            d.line_number = Some(line_number);
        }
        result.diagnostics.push(d);
    }
}

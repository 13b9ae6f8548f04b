// swift-build-report - core/xcode.rs
//
// Xcode dialect parser: reduces `xcodebuild` console output into a
// ParsedBuildResult. Line-by-line, in source order.

use crate::core::diagnostic::parse_diagnostic_line;
use crate::core::model::{
    BuildFormat, BuildStatus, DiagnosticCategory, ParsedBuildResult,
};
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

fn duration_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)completed in ([0-9.]+)s(\s|$)").unwrap(),
            Regex::new(r"(?i)completed in ([0-9.]+) second").unwrap(),
            Regex::new(r"\(([0-9.]+) seconds?\)").unwrap(),
            Regex::new(r"\(([0-9.]+)s\)").unwrap(),
        ]
    })
}

/// Best-effort parse of `input` as `xcodebuild` console output.
pub fn parse(input: &str) -> ParsedBuildResult {
    let mut result = ParsedBuildResult::unknown();
    result.format = BuildFormat::Xcode;

    let mut start_sentinel_fired = false;
    // Locks the moment any of the four duration regexes first matches, so a
    // later duration-shaped line in the same log never overwrites it.
    let mut duration_locked = false;

    for line in input.lines() {
        let lower = line.to_lowercase();

        // Start-of-build sentinel.
        if !start_sentinel_fired
            && (lower.contains("build start")
                || lower.starts_with("build settings")
                || lower.starts_with("build target")
                || lower.contains("xcodebuild"))
        {
            result.timing.start_time = Some(Utc::now());
            start_sentinel_fired = true;
        }

        // Duration extraction precedes status detection so an explicit
        // duration is never overwritten by the end-of-build computation.
        if !duration_locked {
            for pattern in duration_patterns() {
                if let Some(caps) = pattern.captures(line) {
                    if let Some(val) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                        result.timing.total_duration = val;
                        duration_locked = true;
                        break;
                    }
                }
            }
        }

        // Status.
        if lower.contains("build succeeded") || line.trim() == "** BUILD SUCCEEDED **" {
            result.status = BuildStatus::Success;
            stamp_end_time(&mut result, start_sentinel_fired);
        } else if lower.contains("build failed") || line.trim() == "** BUILD FAILED **" {
            result.status = BuildStatus::Failed;
            stamp_end_time(&mut result, start_sentinel_fired);
        }

        // Diagnostics.
        if lower.contains(": error:") || lower.contains(" error: ") {
            if let Some(d) = parse_diagnostic_line(line, DiagnosticCategory::Build) {
                result.diagnostics.push(d);
            }
        } else if lower.contains(": warning:") || lower.contains(" warning: ") {
            if let Some(d) = parse_diagnostic_line(line, DiagnosticCategory::Build) {
                result.diagnostics.push(d);
            }
        } else if lower.contains(": note:") || lower.contains(" note: ") {
            if let Some(d) = parse_diagnostic_line(line, DiagnosticCategory::Build) {
                result.diagnostics.push(d);
            }
        }

        // Compiled files.
        if let Some(basename) = extract_compiled_swift_file(line) {
            result.metrics.add_compiled_file(basename);
        }

        // Targets.
        if line.contains("=== BUILD TARGET") || line.contains("Build target") {
            result.metrics.target_count += 1;
        }
    }

    result.metrics.total_duration = Some(result.timing.total_duration);
    result.finalize_status();
    result
}

fn stamp_end_time(result: &mut ParsedBuildResult, start_sentinel_fired: bool) {
    result.timing.end_time = Some(Utc::now());
    if result.timing.total_duration == 0.0 && start_sentinel_fired {
        if let (Some(start), Some(end)) = (result.timing.start_time, result.timing.end_time) {
            let secs = (end - start).num_milliseconds() as f64 / 1000.0;
            result.timing.total_duration = secs.max(0.0);
        }
    }
}

/// Extract the basename of a compiled `.swift` file from a single line, or
/// `None` if the line does not name a compiled `.swift` file.
fn extract_compiled_swift_file(line: &str) -> Option<String> {
    let qualifies = (line.contains("Compiling") && line.contains(".swift")) || {
        let stripped = strip_in_target_suffix(line);
        (stripped.contains("CompileSwift") || stripped.contains("SwiftCompile")) && stripped.contains(".swift")
    } || (line.trim_end().ends_with(".swift") && line.contains('/'));

    if !qualifies {
        return None;
    }

    line.split_whitespace()
        .rev()
        .find(|tok| tok.ends_with(".swift"))
        .map(|tok| basename(tok))
}

fn strip_in_target_suffix(line: &str) -> String {
    if let Some(idx) = line.find(" (in target") {
        line[..idx].to_string()
    } else {
        line.to_string()
    }
}

fn basename(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::DiagnosticSeverity;

    #[test]
    fn test_success_scenario() {
        let input = "=== BUILD TARGET MyApp ===\nCompiling MyApp ViewController.swift\nCompiling MyApp AppDelegate.swift\n** BUILD SUCCEEDED **";
        let r = parse(input);
        assert_eq!(r.format, BuildFormat::Xcode);
        assert_eq!(r.status, BuildStatus::Success);
        assert_eq!(r.metrics.error_count, 0);
        assert_eq!(r.metrics.warning_count, 0);
        assert_eq!(r.metrics.compiled_files, vec!["ViewController.swift", "AppDelegate.swift"]);
        assert_eq!(r.metrics.target_count, 1);
    }

    #[test]
    fn test_failure_with_diagnostic() {
        let input = "=== BUILD TARGET MyApp ===\n/path/to/File.swift:42:10: error: cannot find type 'Foo' in scope\n** BUILD FAILED **";
        let r = parse(input);
        assert_eq!(r.status, BuildStatus::Failed);
        assert_eq!(r.diagnostics.len(), 1);
        let d = &r.diagnostics[0];
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert_eq!(d.file_path.as_ref().unwrap().to_str().unwrap(), "/path/to/File.swift");
        assert_eq!(d.line_number, Some(42));
        assert_eq!(d.column, Some(10));
        assert!(d.message.contains("cannot find type"));
    }

    #[test]
    fn test_duration_literal() {
        let input = "Build completed in 10.5 seconds\n** BUILD SUCCEEDED **";
        let r = parse(input);
        assert!((r.timing.total_duration - 10.5).abs() < 0.001);
    }

    #[test]
    fn test_first_duration_wins() {
        let input = "Build completed in 5.0 seconds\nsome other (9.0s) text\n** BUILD SUCCEEDED **";
        let r = parse(input);
        assert!((r.timing.total_duration - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_no_explicit_status_derives_from_errors() {
        let input = "=== BUILD TARGET MyApp ===\nCompiling MyApp Foo.swift";
        let r = parse(input);
        assert_eq!(r.status, BuildStatus::Success);
    }

    #[test]
    fn test_swiftcompile_variant_compiled_file() {
        let input = "CompileSwift normal x86_64 /src/Foo.swift (in target 'App' from project 'App')";
        let r = parse(input);
        assert_eq!(r.metrics.compiled_files, vec!["Foo.swift"]);
    }
}

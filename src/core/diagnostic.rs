// swift-build-report - core/diagnostic.rs
//
// Shared subroutine used by every dialect parser: split a single line of
// the form `<location>: <severity>: <message>` into file/line/column/message.
// Handles POSIX paths, Windows drive-letter paths, and path-less variants.

use crate::core::model::{Diagnostic, DiagnosticCategory, DiagnosticSeverity};
use std::path::PathBuf;

/// Severity markers scanned for, most to least specific. The earliest
/// occurrence in the line wins regardless of which marker it is.
const MARKERS: &[(&str, DiagnosticSeverity)] = &[
    (": error:", DiagnosticSeverity::Error),
    (": warning:", DiagnosticSeverity::Warning),
    (": note:", DiagnosticSeverity::Info),
    (" error: ", DiagnosticSeverity::Error),
    (" warning: ", DiagnosticSeverity::Warning),
    (" note: ", DiagnosticSeverity::Info),
];

/// Default category assigned when the caller does not re-classify; callers
/// pass `default_category` so the Xcode/SPM parsers can request `Build` and
/// the Swift parser can request `Compilation`.
pub fn parse_diagnostic_line(line: &str, default_category: DiagnosticCategory) -> Option<Diagnostic> {
    // ASCII-only lowering: every marker is ASCII, and unlike `to_lowercase()`
    // this never changes a character's byte length, so indices found in
    // `lower` stay valid offsets into `line`.
    let lower = line.to_ascii_lowercase();

    // Find the earliest marker occurrence.
    let mut best: Option<(usize, usize, DiagnosticSeverity)> = None;
    for (marker, severity) in MARKERS {
        if let Some(idx) = lower.find(marker) {
            let is_better = match best {
                None => true,
                Some((best_idx, _, _)) => idx < best_idx,
            };
            if is_better {
                best = Some((idx, marker.len(), *severity));
            }
        }
    }

    let (location, message, severity) = if let Some((idx, marker_len, severity)) = best {
        let location = line[..idx].trim();
        let message = line[idx + marker_len..].trim();
        (
            if location.is_empty() { None } else { Some(location.to_string()) },
            message.to_string(),
            severity,
        )
    } else {
        // No marker found anywhere: only a leading `error:`/`warning:`/`note:`
        // (no location) counts.
        let leading = [
            ("error:", DiagnosticSeverity::Error),
            ("warning:", DiagnosticSeverity::Warning),
            ("note:", DiagnosticSeverity::Info),
        ];
        let mut found = None;
        for (prefix, severity) in leading {
            if lower.starts_with(prefix) {
                found = Some((prefix.len(), severity));
                break;
            }
        }
        match found {
            Some((prefix_len, severity)) => (None, line[prefix_len..].trim().to_string(), severity),
            None => return None,
        }
    };

    if message.is_empty() {
        return None;
    }

    let (file_path, line_number, column) = location.as_deref().map(parse_location).unwrap_or((None, None, None));
    let category = classify_category(&message, default_category);

    Some(Diagnostic {
        severity,
        category,
        message,
        location,
        file_path,
        line_number,
        column,
    })
}

/// Parse a `location` substring into (file_path, line_number, column).
fn parse_location(location: &str) -> (Option<PathBuf>, Option<u32>, Option<u32>) {
    // Drive-letter path: second character is ':' (e.g. "C:\path\File.swift:42:10").
    let bytes: Vec<char> = location.chars().collect();
    if bytes.len() > 1 && bytes[1] == ':' {
        // Scan colons from the right: last integer suffix is column, the
        // preceding one is line_number, the remainder is file_path.
        let parts: Vec<&str> = location.split(':').collect();
        // parts[0] is empty colon-split artifact is not the case here since
        // drive letter itself contains a colon; rebuild by splitting off the
        // last two colon-separated numeric fields from the right.
        if parts.len() >= 2 {
            let last = parts[parts.len() - 1];
            let last_is_num = last.parse::<u32>().ok();
            if let Some(col) = last_is_num {
                if parts.len() >= 3 {
                    let prev = parts[parts.len() - 2];
                    if let Ok(line_no) = prev.parse::<u32>() {
                        let file_path = parts[..parts.len() - 2].join(":");
                        return (Some(PathBuf::from(file_path)), Some(line_no), Some(col));
                    }
                }
                // Only one trailing integer: no preceding integer to pair it
                // with, so treat it as line_number and leave column unset.
                let file_path = parts[..parts.len() - 1].join(":");
                return (Some(PathBuf::from(file_path)), Some(col), None);
            }
            // Trailing token isn't numeric: whole location is the file path.
            return (Some(PathBuf::from(location)), None, None);
        }
        return (Some(PathBuf::from(location)), None, None);
    }

    // POSIX / path-less: split left-to-right.
    let mut parts = location.splitn(3, ':');
    let file_path = parts.next().map(PathBuf::from);
    let line_number = parts.next().and_then(|s| s.parse::<u32>().ok());
    let column = parts.next().and_then(|s| s.parse::<u32>().ok());

    (file_path, line_number, column)
}

/// Classify the diagnostic category from the message text.
fn classify_category(message: &str, default_category: DiagnosticCategory) -> DiagnosticCategory {
    let lower = message.to_lowercase();
    if lower.contains("linker") || lower.contains("undefined symbol") || lower.contains("ld:") {
        return DiagnosticCategory::Linking;
    }
    let mentions_dependency = lower.contains("package")
        || lower.contains(" dependency")
        || lower.contains("dependency ")
        || (lower.contains("resolve") && !lower.contains("unresolved"));
    if mentions_dependency {
        return DiagnosticCategory::Dependency;
    }
    default_category
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_path_with_line_and_column() {
        let d = parse_diagnostic_line(
            "/path/to/File.swift:42:10: error: cannot find type 'Foo' in scope",
            DiagnosticCategory::Build,
        )
        .unwrap();
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert_eq!(d.file_path, Some(PathBuf::from("/path/to/File.swift")));
        assert_eq!(d.line_number, Some(42));
        assert_eq!(d.column, Some(10));
        assert!(d.message.contains("cannot find type"));
    }

    #[test]
    fn test_missing_column() {
        let d = parse_diagnostic_line("File.swift:10: warning: unused variable", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.line_number, Some(10));
        assert_eq!(d.column, None);
    }

    #[test]
    fn test_path_less_variant() {
        let d = parse_diagnostic_line("error: build failed", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.location, None);
        assert_eq!(d.file_path, None);
        assert_eq!(d.message, "build failed");
    }

    #[test]
    fn test_drive_letter_path() {
        let d = parse_diagnostic_line(
            r"C:\src\File.swift:12:4: error: missing return",
            DiagnosticCategory::Build,
        )
        .unwrap();
        assert_eq!(d.file_path, Some(PathBuf::from(r"C:\src\File.swift")));
        assert_eq!(d.line_number, Some(12));
        assert_eq!(d.column, Some(4));
    }

    #[test]
    fn test_note_maps_to_info() {
        let d = parse_diagnostic_line("File.swift:1:1: note: expanded from macro", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.severity, DiagnosticSeverity::Info);
    }

    #[test]
    fn test_space_delimited_marker() {
        let d = parse_diagnostic_line("somewhere error: odd format", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert_eq!(d.location, Some("somewhere".to_string()));
    }

    #[test]
    fn test_linking_category() {
        let d = parse_diagnostic_line("error: Linker command failed with exit code 1", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.category, DiagnosticCategory::Linking);
    }

    #[test]
    fn test_dependency_category() {
        let d = parse_diagnostic_line("error: unable to resolve package dependencies", DiagnosticCategory::Compilation).unwrap();
        assert_eq!(d.category, DiagnosticCategory::Dependency);
    }

    #[test]
    fn test_no_marker_returns_none() {
        assert!(parse_diagnostic_line("just a plain line of text", DiagnosticCategory::Build).is_none());
    }

    #[test]
    fn test_location_never_contains_severity_label() {
        let d = parse_diagnostic_line("File.swift:1:1: error: boom", DiagnosticCategory::Build).unwrap();
        let loc = d.location.unwrap();
        assert!(!loc.to_lowercase().contains("error:"));
    }

    #[test]
    fn test_non_numeric_trailing_token_stays_in_file_path() {
        // "File.swift:notanumber" -- element 1 doesn't parse as integer, so
        // there is no line_number/column and filePath is just element 0.
        let d = parse_diagnostic_line("File.swift:notanumber: error: weird", DiagnosticCategory::Build).unwrap();
        assert_eq!(d.file_path, Some(PathBuf::from("File.swift")));
        assert_eq!(d.line_number, None);
    }
}

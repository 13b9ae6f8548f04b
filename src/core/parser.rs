// swift-build-report - core/parser.rs
//
// Dispatch entry point: run the detector, then hand off to the matching
// dialect parser. `parse_with_format` skips detection when the caller
// already knows (or wants to force) the dialect.

use crate::core::model::{BuildFormat, ParsedBuildResult};
use crate::core::{detector, spm, swift, xcode};

/// Detect the dialect and parse `text` accordingly.
pub fn parse(text: &str) -> ParsedBuildResult {
    let format = detector::detect(text);
    parse_with_format(text, format)
}

/// Parse `text` as the given dialect, skipping detection.
pub fn parse_with_format(text: &str, format: BuildFormat) -> ParsedBuildResult {
    match format {
        BuildFormat::Xcode => xcode::parse(text),
        BuildFormat::Swift => swift::parse(text),
        BuildFormat::Spm => spm::parse(text),
        BuildFormat::Unknown => ParsedBuildResult::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BuildStatus;

    #[test]
    fn test_dispatches_to_xcode() {
        let r = parse("=== BUILD TARGET MyApp ===\n** BUILD SUCCEEDED **");
        assert_eq!(r.format, BuildFormat::Xcode);
        assert_eq!(r.status, BuildStatus::Success);
    }

    #[test]
    fn test_dispatches_to_swift() {
        let r = parse("Compiling Swift Module 'App'\nBuild complete!");
        assert_eq!(r.format, BuildFormat::Swift);
    }

    #[test]
    fn test_dispatches_to_spm() {
        let r = parse(r#"{"name": "MyPackage"}"#);
        assert_eq!(r.format, BuildFormat::Spm);
    }

    #[test]
    fn test_unknown_input_returns_unknown_result() {
        let r = parse("");
        assert_eq!(r.format, BuildFormat::Unknown);
        assert_eq!(r.status, BuildStatus::Unknown);
    }

    #[test]
    fn test_parse_with_format_forces_dialect() {
        // Plain text with no Swift markers, forced to the Swift dialect.
        let r = parse_with_format("Build complete!", BuildFormat::Swift);
        assert_eq!(r.format, BuildFormat::Swift);
        assert_eq!(r.status, BuildStatus::Success);
    }
}

// swift-build-report - core/detector.rs
//
// Format detection: a predicate per dialect plus a priority-ordered
// dispatch. Dispatch order is fixed: SPM -> Swift/SPM-Build -> Xcode.
// SPM metadata has the most distinctive surface (JSON, tree glyphs),
// Swift/SPM-Build has more specific markers than Xcode, and Xcode is the
// permissive fallback for plain `xcodebuild` invocations.

use crate::core::model::BuildFormat;

const XCODE_MARKERS: &[&str] = &[
    "xcodebuild",
    "build succeeded",
    "build failed",
    "** build",
    "=== build target",
    "build settings from",
    "compileswift",
    "swiftcompile",
    "codesign",
    "processinfoplistfile",
];

const SWIFT_MARKERS_CASE_SENSITIVE: &[&str] = &[
    "Swift Compiler",
    "swift build",
    "swift test",
    "Apple Swift version",
    "Building for",
    "Compiling Swift Module",
    "swift-package",
    "Fetching https://",
    "Cloning https://",
    "Resolving https://",
    "SwiftPM",
    ".build/checkouts",
    "Compiling ",
    "Linking ",
];

const SPM_KEYWORDS: &[&str] = &["resolving", "fetching", "resolved", "updating", "cloning"];

/// Whether `input` looks like `xcodebuild` console output.
pub fn is_xcode(input: &str) -> bool {
    let lower = input.to_lowercase();
    XCODE_MARKERS.iter().any(|m| lower.contains(m)) || input.contains("Ld ")
}

/// Whether `input` looks like `swift build`/`swift test` console output.
pub fn is_swift(input: &str) -> bool {
    if SWIFT_MARKERS_CASE_SENSITIVE.iter().any(|m| input.contains(m)) {
        return true;
    }
    let lower = input.to_lowercase();
    if lower.contains("build complete!") {
        return true;
    }
    let has_swift_diagnostic = lower.contains(": error:") || lower.contains(": warning:");
    has_swift_diagnostic && !is_xcode(input)
}

/// Whether `input` looks like SPM metadata output (dump-package,
/// show-dependencies, resolve/update, describe).
pub fn is_spm(input: &str) -> bool {
    let lower = input.to_lowercase();

    let has_name = lower.contains("\"name\"");
    let has_json_shape = lower.contains("\"targets\"") || lower.contains("\"products\"") || lower.contains("\"dependencies\"");
    if has_name && has_json_shape {
        return true;
    }

    if input.contains("├─") || input.contains("└─") || input.contains('│') || lower.contains("dependencies:") {
        return true;
    }

    if SPM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }

    if lower.contains("package name:") || lower.contains("package version:") {
        return true;
    }

    false
}

/// Select the active dialect using the fixed priority order. Empty or
/// whitespace-only input matches no dialect.
pub fn detect(input: &str) -> BuildFormat {
    if input.trim().is_empty() {
        return BuildFormat::Unknown;
    }
    if is_spm(input) {
        BuildFormat::Spm
    } else if is_swift(input) {
        BuildFormat::Swift
    } else if is_xcode(input) {
        BuildFormat::Xcode
    } else {
        BuildFormat::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_unknown() {
        assert_eq!(detect(""), BuildFormat::Unknown);
        assert_eq!(detect("   \n\t  "), BuildFormat::Unknown);
    }

    #[test]
    fn test_xcode_detection() {
        assert_eq!(detect("=== BUILD TARGET MyApp ===\n** BUILD SUCCEEDED **"), BuildFormat::Xcode);
        assert_eq!(detect("some xcodebuild invocation log"), BuildFormat::Xcode);
    }

    #[test]
    fn test_swift_detection() {
        assert_eq!(detect("Compiling Swift Module 'App'\nBuild complete!"), BuildFormat::Swift);
        assert_eq!(detect("Linking ./.build/debug/App"), BuildFormat::Swift);
    }

    #[test]
    fn test_spm_json_detection() {
        assert_eq!(detect(r#"{"name": "MyPackage", "targets": []}"#), BuildFormat::Spm);
    }

    #[test]
    fn test_spm_tree_detection() {
        assert_eq!(detect("Dependencies:\n└─ swift-algorithms@1.0.0"), BuildFormat::Spm);
    }

    #[test]
    fn test_priority_spm_over_swift_and_xcode() {
        // Mixed input that contains both SPM tree glyphs and Swift markers --
        // SPM must win.
        let input = "Compiling Swift Module 'App'\nDependencies:\n└─ swift-nio@2.0.0";
        assert_eq!(detect(input), BuildFormat::Spm);
    }

    #[test]
    fn test_priority_swift_over_xcode() {
        let input = "swift build\n/path/File.swift:1:1: error: boom";
        assert_eq!(detect(input), BuildFormat::Swift);
    }

    #[test]
    fn test_generic_swift_diagnostic_only_when_not_xcode() {
        // A bare Swift-style diagnostic with no other markers is Swift...
        assert_eq!(detect("File.swift:1:1: error: something"), BuildFormat::Swift);
        // ...but not when Xcode markers are also present.
        let input = "xcodebuild\nFile.swift:1:1: error: something";
        assert_eq!(detect(input), BuildFormat::Xcode);
    }
}

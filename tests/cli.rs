// swift-build-report - tests/cli.rs
//
// Black-box coverage of the core parse -> render pipeline as the CLI
// exercises it. Goes through the library crate directly rather than
// spawning the binary.

use swift_build_report::core::model::{BuildFormat, BuildStatus};
use swift_build_report::core::parser;
use swift_build_report::format::{self, OutputFormat};

#[test]
fn test_xcode_success_end_to_end() {
    let input = "=== BUILD TARGET MyApp ===\nCompiling MyApp ViewController.swift\nCompiling MyApp AppDelegate.swift\n** BUILD SUCCEEDED **";
    let result = parser::parse(input);
    assert_eq!(result.format, BuildFormat::Xcode);
    assert_eq!(result.status, BuildStatus::Success);
    assert_eq!(result.metrics.error_count, 0);
    assert_eq!(result.metrics.compiled_files, vec!["ViewController.swift", "AppDelegate.swift"]);
    assert_eq!(result.metrics.target_count, 1);

    let rendered = format::render(&result, OutputFormat::Text, false, false).unwrap();
    assert!(rendered.contains("Status:   success"));
}

#[test]
fn test_xcode_failure_with_diagnostic_end_to_end() {
    let input = "=== BUILD TARGET MyApp ===\n/path/to/File.swift:42:10: error: cannot find type 'Foo' in scope\n** BUILD FAILED **";
    let result = parser::parse(input);
    assert_eq!(result.status, BuildStatus::Failed);
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.line_number, Some(42));
    assert_eq!(d.column, Some(10));

    let rendered = format::render(&result, OutputFormat::Json, false, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["status"], "failed");
    assert_eq!(value["diagnostics"][0]["lineNumber"], serde_json::json!(42));
}

#[test]
fn test_spm_show_dependencies_tree_end_to_end() {
    let input = "Dependencies:\n└─ MyPackage\n   ├─ swift-algorithms@1.0.0\n   ├─ swift-nio@2.0.0\n   └─ logging";
    let result = parser::parse(input);
    assert_eq!(result.format, BuildFormat::Spm);
    assert_eq!(result.status, BuildStatus::Success);
    assert_eq!(result.metrics.target_count, 3);
}

#[test]
fn test_swift_build_mixed_diagnostics_end_to_end() {
    let input = "Compiling Module A.swift\n/path/File.swift:3:5: error: boom\nBuild complete! (8.7s)";
    let result = parser::parse(input);
    assert_eq!(result.format, BuildFormat::Swift);
    assert_eq!(result.status, BuildStatus::Failed);
    assert!((result.timing.total_duration - 8.7).abs() < 0.001);
    assert_eq!(result.metrics.compiled_files, vec!["A.swift"]);
}

#[test]
fn test_minimal_rendering_end_to_end() {
    let input = "=== BUILD TARGET MyApp ===\n** BUILD SUCCEEDED **";
    let result = parser::parse(input);
    let rendered = format::render(&result, OutputFormat::Text, true, false).unwrap();
    assert!(rendered.starts_with("SUCCESS |"));
    assert!(rendered.contains("ERRORS: 0"));
}

#[test]
fn test_empty_input_is_unknown_end_to_end() {
    let result = parser::parse("");
    assert_eq!(result.format, BuildFormat::Unknown);
    assert_eq!(result.status, BuildStatus::Unknown);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_json_round_trip_structural_equivalence() {
    let input = "=== BUILD TARGET MyApp ===\n/path/to/File.swift:42:10: error: cannot find type 'Foo' in scope\n** BUILD FAILED **";
    let result = parser::parse(input);
    let rendered = format::render(&result, OutputFormat::Json, false, false).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    let reference: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert_eq!(reparsed, reference);
}

#[test]
fn test_parsing_empty_string_twice_is_identical() {
    let a = parser::parse("");
    let b = parser::parse("");
    let a_json = serde_json::to_value(&a).unwrap();
    let b_json = serde_json::to_value(&b).unwrap();
    assert_eq!(a_json, b_json);
}

#[test]
fn test_crlf_line_endings_handled() {
    let input = "=== BUILD TARGET MyApp ===\r\nCompiling MyApp Foo.swift\r\n** BUILD SUCCEEDED **\r\n";
    let result = parser::parse(input);
    assert_eq!(result.status, BuildStatus::Success);
    assert_eq!(result.metrics.compiled_files, vec!["Foo.swift"]);
}

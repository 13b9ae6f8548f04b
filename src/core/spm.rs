// swift-build-report - core/spm.rs
//
// SPM-metadata dialect parser: reduces `swift package` console/JSON output
// into a ParsedBuildResult. Four sub-commands share one entry point.

use crate::core::model::{
    BuildFormat, BuildStatus, Diagnostic, DiagnosticCategory, DiagnosticSeverity, DependencyType,
    ParsedBuildResult, SpmDependency, SpmInfo, SpmTarget,
};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpmCommand {
    DumpPackage,
    ShowDependencies,
    Resolve,
    Describe,
    Update,
    Unknown,
}

fn classify(input: &str) -> SpmCommand {
    let trimmed = input.trim_start();
    let lower = input.to_lowercase();

    if trimmed.starts_with('{') || lower.contains("\"name\"") {
        return SpmCommand::DumpPackage;
    }
    if input.contains("├─") || input.contains("└─") || input.contains('│') || lower.contains("dependencies:") {
        return SpmCommand::ShowDependencies;
    }
    if lower.contains("resolving") || lower.contains("fetching") || lower.contains("resolved") || lower.contains("updating") {
        return SpmCommand::Resolve;
    }
    if lower.contains("package name:") || lower.contains("package version:") {
        return SpmCommand::Describe;
    }
    if lower.contains("updating") || lower.contains("updated") || lower.contains("checking out") {
        return SpmCommand::Update;
    }
    SpmCommand::Unknown
}

/// Best-effort parse of `input` as `swift package` metadata output.
pub fn parse(input: &str) -> ParsedBuildResult {
    let mut result = ParsedBuildResult::unknown();
    result.format = BuildFormat::Spm;

    match classify(input) {
        SpmCommand::DumpPackage => parse_dump_package(input, &mut result),
        SpmCommand::ShowDependencies => parse_show_dependencies(input, &mut result),
        SpmCommand::Resolve | SpmCommand::Update => parse_resolve_or_update(input, &mut result),
        SpmCommand::Describe => parse_describe(input, &mut result),
        SpmCommand::Unknown => {}
    }

    result
}

// =============================================================================
// dumpPackage
// =============================================================================

fn parse_dump_package(input: &str, result: &mut ParsedBuildResult) {
    let value: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            result.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Error,
                category: DiagnosticCategory::Dependency,
                message: format!("Failed to parse Package.swift JSON: {e}"),
                location: None,
                file_path: None,
                line_number: None,
                column: None,
            });
            result.status = BuildStatus::Failed;
            result.metrics.recount(&result.diagnostics);
            return;
        }
    };

    let package_name = value.get("name").and_then(Value::as_str).map(str::to_string);

    let targets = value.get("products").and_then(Value::as_array).map(|products| {
        products
            .iter()
            .map(|p| SpmTarget {
                name: p.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
                target_type: p
                    .get("type")
                    .and_then(|t| t.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                dependencies: Vec::new(),
            })
            .collect::<Vec<_>>()
    });

    let dependencies = value.get("dependencies").and_then(Value::as_array).map(|deps| {
        deps.iter().filter_map(parse_dependency).collect::<Vec<_>>()
    });

    result.spm_info = Some(SpmInfo {
        command: "dumpPackage".to_string(),
        success: true,
        package_name,
        version: None,
        targets,
        dependencies,
    });
    result.status = BuildStatus::Success;
}

fn parse_dependency(dep: &Value) -> Option<SpmDependency> {
    // Modern layout: sourceControl[0].
    if let Some(sc) = dep.get("sourceControl").and_then(Value::as_array).and_then(|a| a.first()) {
        let name = sc.get("identity").and_then(Value::as_str).unwrap_or_default().to_string();
        let url = sc
            .get("location")
            .and_then(|l| l.get("remote"))
            .and_then(Value::as_array)
            .and_then(|a| a.first())
            .and_then(|r| r.get("urlString"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let version = sc.get("requirement").map(extract_version).unwrap_or_else(|| "unspecified".to_string());
        let dependency_type = determine_type_by_url(url.as_deref());
        return Some(SpmDependency { name, version, dependency_type, url });
    }

    // Legacy fallback.
    if let Some(url) = dep.get("url").and_then(Value::as_str) {
        let name = dep
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| derive_name_from_url(url));
        let version = dep.get("requirement").map(extract_version).unwrap_or_else(|| "unspecified".to_string());
        let dependency_type = determine_type_by_url(Some(url));
        return Some(SpmDependency { name, version, dependency_type, url: Some(url.to_string()) });
    }
    if let Some(path) = dep.get("path").and_then(Value::as_str) {
        let name = dep.get("name").and_then(Value::as_str).unwrap_or(path).to_string();
        return Some(SpmDependency {
            name,
            version: "local".to_string(),
            dependency_type: DependencyType::SourceControl,
            url: None,
        });
    }

    None
}

fn derive_name_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

fn determine_type_by_url(url: Option<&str>) -> DependencyType {
    match url {
        Some(u) if u.ends_with(".binary") => DependencyType::Binary,
        Some(u) if u.contains("@swift-package-registry") => DependencyType::Registry,
        Some(_) => DependencyType::SourceControl,
        None => DependencyType::SourceControl,
    }
}

/// From a `requirement` mapping: `range` (array of `{lowerBound, upperBound}`
/// objects) formatted as `"{lowerBound} - {upperBound}"`, else `branch`/
/// `revision`/`exact`, else "unspecified".
fn extract_version(requirement: &Value) -> String {
    if let Some(bounds) = requirement.get("range").and_then(Value::as_array).and_then(|a| a.first()) {
        let lower = bounds.get("lowerBound").and_then(Value::as_str);
        let upper = bounds.get("upperBound").and_then(Value::as_str);
        if let (Some(lower), Some(upper)) = (lower, upper) {
            return format!("{lower} - {upper}");
        }
    }
    if let Some(branch) = requirement.get("branch").and_then(Value::as_str) {
        return format!("branch: {branch}");
    }
    if let Some(revision) = requirement.get("revision").and_then(Value::as_str) {
        let short: String = revision.chars().take(7).collect();
        return format!("revision: {short}");
    }
    if let Some(exact) = requirement.get("exact").and_then(Value::as_str) {
        return exact.to_string();
    }
    "unspecified".to_string()
}

// =============================================================================
// showDependencies
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DependencySectionState {
    Preamble,
    InSection,
}

fn parse_show_dependencies(input: &str, result: &mut ParsedBuildResult) {
    let lines: Vec<&str> = input.lines().collect();
    let mut state = DependencySectionState::Preamble;
    let mut header_seen = false;
    let mut first_glyph_line_seen = false;
    let mut entered_section = false;
    let mut dependencies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if lower.trim() == "dependencies:" {
            header_seen = true;
            state = DependencySectionState::InSection;
            entered_section = true;
            continue;
        }

        if lower.starts_with("error:") {
            result.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Error,
                category: DiagnosticCategory::Dependency,
                message: line.trim_start_matches("error:").trim_start_matches("Error:").trim().to_string(),
                location: None,
                file_path: None,
                line_number: None,
                column: None,
            });
            continue;
        }
        if lower.starts_with("warning:") {
            result.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                category: DiagnosticCategory::Dependency,
                message: line.trim_start_matches("warning:").trim_start_matches("Warning:").trim().to_string(),
                location: None,
                file_path: None,
                line_number: None,
                column: None,
            });
            continue;
        }

        let has_glyph = has_tree_glyph(line);

        if state == DependencySectionState::Preamble && !has_glyph {
            continue;
        }
        if state == DependencySectionState::Preamble {
            state = DependencySectionState::InSection;
            entered_section = true;
        }

        // Root-package lookahead: the first tree-glyph line overall is a
        // candidate root-package, skipped exactly once, if the header was
        // seen AND at least one of the next two lines is more indented AND
        // also bears a tree glyph.
        if has_glyph && !first_glyph_line_seen {
            first_glyph_line_seen = true;
            if header_seen {
                let my_indent = leading_indent(line);
                let lookahead_confirms = lines
                    .iter()
                    .skip(idx + 1)
                    .take(2)
                    .any(|l| has_tree_glyph(l) && leading_indent(l) > my_indent);
                if lookahead_confirms {
                    continue;
                }
            }
        }

        if let Some(dep) = parse_dependency_line(line) {
            dependencies.push(dep);
        }
    }

    result.metrics.target_count = dependencies.len() as u32;
    result.metrics.recount(&result.diagnostics);

    result.spm_info = Some(SpmInfo {
        command: "showDependencies".to_string(),
        success: result.metrics.error_count == 0 && entered_section,
        package_name: None,
        version: None,
        targets: None,
        dependencies: Some(dependencies),
    });

    if result.metrics.error_count > 0 {
        result.status = BuildStatus::Failed;
    } else if entered_section {
        result.status = BuildStatus::Success;
    } else {
        result.status = BuildStatus::Unknown;
    }
}

fn has_tree_glyph(line: &str) -> bool {
    line.contains('├') || line.contains('└') || line.contains('│') || line.contains('─')
}

fn leading_indent(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

fn clean_dependency_text(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, '├' | '└' | '│' | '─'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_dependency_line(line: &str) -> Option<SpmDependency> {
    let cleaned = clean_dependency_text(line);
    if cleaned.is_empty() {
        return None;
    }

    // Pattern 4: NAME<URL@VERSION>
    if let (Some(open), Some(close)) = (cleaned.find('<'), cleaned.rfind('>')) {
        if close > open {
            let name = cleaned[..open].trim().to_string();
            let inner = &cleaned[open + 1..close];
            let (url, version) = match inner.rsplit_once('@') {
                Some((u, v)) => (u.to_string(), v.to_string()),
                None => (inner.to_string(), "unspecified".to_string()),
            };
            return Some(SpmDependency {
                name,
                version,
                dependency_type: DependencyType::SourceControl,
                url: Some(url),
            });
        }
    }

    // Pattern 3: NAME [URL]
    if let (Some(open), Some(close)) = (cleaned.find('['), cleaned.rfind(']')) {
        if close > open {
            let name = cleaned[..open].trim().to_string();
            let url = cleaned[open + 1..close].trim().to_string();
            return Some(SpmDependency {
                name,
                version: "source-control".to_string(),
                dependency_type: DependencyType::SourceControl,
                url: Some(url),
            });
        }
    }

    // Pattern 1: NAME (VERSION)
    if let (Some(open), Some(close)) = (cleaned.find('('), cleaned.rfind(')')) {
        if close > open {
            let name = cleaned[..open].trim().to_string();
            let version = cleaned[open + 1..close].trim().to_string();
            let dependency_type = determine_type_by_version(&version);
            return Some(SpmDependency { name, version, dependency_type, url: None });
        }
    }

    // Pattern 2: NAME@VERSION
    if let Some((name, version)) = cleaned.split_once('@') {
        let dependency_type = determine_type_by_version(version);
        return Some(SpmDependency {
            name: name.trim().to_string(),
            version: version.trim().to_string(),
            dependency_type,
            url: None,
        });
    }

    // Pattern 5: NAME revision:/branch:/exact:
    // ASCII-only lowering keeps byte offsets valid for slicing `cleaned` below.
    let cleaned_lower = cleaned.to_ascii_lowercase();
    for marker in ["revision:", "branch:", "exact:"] {
        if let Some(idx) = cleaned_lower.find(marker) {
            let name = cleaned[..idx].split_whitespace().next().unwrap_or("").to_string();
            let version = cleaned[idx..].trim().to_string();
            return Some(SpmDependency {
                name,
                version,
                dependency_type: DependencyType::SourceControl,
                url: None,
            });
        }
    }

    // Pattern 6: NAME VERSION (space separated, version looks numeric)
    let mut tokens = cleaned.split_whitespace();
    if let Some(first) = tokens.next() {
        let rest: Vec<&str> = tokens.collect();
        if !rest.is_empty() {
            let candidate = rest.join(" ");
            let starts_digit = candidate.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false);
            if starts_digit || candidate.contains('.') {
                let dependency_type = determine_type_by_version(&candidate);
                return Some(SpmDependency {
                    name: first.to_string(),
                    version: candidate,
                    dependency_type,
                    url: None,
                });
            }
        } else {
            // Pattern 7: NAME (single token)
            return Some(SpmDependency {
                name: first.to_string(),
                version: "unspecified".to_string(),
                dependency_type: DependencyType::SourceControl,
                url: None,
            });
        }
    }

    None
}

/// Infer a dependency type from its version-string shape.
fn determine_type_by_version(version: &str) -> DependencyType {
    let lower = version.to_lowercase();
    if lower.contains("branch:") || lower.contains("revision:") {
        DependencyType::SourceControl
    } else if lower.contains(".binary") || lower.contains("xcframework") {
        DependencyType::Binary
    } else if lower.contains("..<") || lower.contains(" - ") || lower.contains("exact:") {
        DependencyType::Registry
    } else {
        DependencyType::SourceControl
    }
}

// =============================================================================
// resolve / update
// =============================================================================

fn parse_resolve_or_update(input: &str, result: &mut ParsedBuildResult) {
    for line in input.lines() {
        let lower = line.to_lowercase();
        if lower.contains("error:") || lower.contains("failed") {
            result.diagnostics.push(make_diagnostic(line, DiagnosticSeverity::Error));
        } else if lower.contains("warning:") {
            result.diagnostics.push(make_diagnostic(line, DiagnosticSeverity::Warning));
        } else if lower.contains("resolving") || lower.contains("cloning") || lower.contains("fetching") || lower.contains("completed") {
            result.diagnostics.push(make_diagnostic(line, DiagnosticSeverity::Info));
        }
    }
    result.metrics.recount(&result.diagnostics);
    result.status = if result.metrics.error_count > 0 { BuildStatus::Failed } else { BuildStatus::Success };
}

// =============================================================================
// describe
// =============================================================================

fn parse_describe(input: &str, result: &mut ParsedBuildResult) {
    for line in input.lines() {
        let lower = line.to_lowercase();
        if lower.contains("error:") {
            result.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Error,
                category: DiagnosticCategory::Build,
                message: line.trim().to_string(),
                location: None,
                file_path: None,
                line_number: None,
                column: None,
            });
        } else if lower.contains("warning:") {
            result.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                category: DiagnosticCategory::Build,
                message: line.trim().to_string(),
                location: None,
                file_path: None,
                line_number: None,
                column: None,
            });
        }
    }
    result.metrics.recount(&result.diagnostics);
    result.status = if result.metrics.error_count > 0 { BuildStatus::Failed } else { BuildStatus::Success };
}

fn make_diagnostic(line: &str, severity: DiagnosticSeverity) -> Diagnostic {
    Diagnostic {
        severity,
        category: DiagnosticCategory::Dependency,
        message: line.trim().to_string(),
        location: None,
        file_path: None,
        line_number: None,
        column: None,
    }
}

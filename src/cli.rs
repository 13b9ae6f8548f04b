// swift-build-report - cli.rs
//
// CLI argument surface and the run loop: read input, parse, filter,
// render, write. Kept thin and synchronous per the single-invocation
// concurrency model -- one input, one report, no worker pool.

use crate::config::CliConfig;
use crate::core::model::{BuildFormat, DiagnosticSeverity, ParsedBuildResult};
use crate::core::parser;
use crate::format::{self, OutputFormat};
use crate::util::error::{BuildReportError, ParseError};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Multi-dialect Swift/Xcode build-log parser producing a uniform
/// structured report.
///
/// Reads an xcodebuild/swift build/swift package log from a file or
/// standard input and prints a structured summary.
#[derive(Parser, Debug)]
#[command(name = "swift-build-report", version, about)]
pub struct Cli {
    /// Log file to read (reads standard input if omitted or `-`).
    path: Option<PathBuf>,

    /// Output format. Falls back to config.toml's [output] format, then "text".
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Force a specific dialect instead of auto-detecting it.
    #[arg(long = "format-hint")]
    format_hint: Option<String>,

    /// Keep only error/critical diagnostics.
    #[arg(short = 'e', long = "errors")]
    errors_only: bool,

    /// Keep only warning diagnostics.
    #[arg(short = 'w', long = "warnings")]
    warnings_only: bool,

    /// Write the rendered report to this file instead of standard output.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print a single-line summary instead of the requested format.
    #[arg(long = "minimal")]
    minimal: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Alias for --verbose.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn debug_enabled(&self) -> bool {
        self.verbose || self.debug
    }
}

/// Parse CLI arguments, run the tool, and return the process exit code.
/// Never panics on user-facing errors: invocation failures are reported on
/// stderr and produce exit code 2.
pub fn run() -> i32 {
    let cli = Cli::parse();
    let (config, config_error) = CliConfig::load();

    crate::util::logging::init(cli.debug_enabled(), config.log_level.as_deref(), None);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Configuration file problem; using defaults");
    }

    match run_inner(&cli, &config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            2
        }
    }
}

fn run_inner(cli: &Cli, config: &CliConfig) -> Result<(), BuildReportError> {
    let format_hint = cli
        .format_hint
        .as_deref()
        .map(parse_format_hint)
        .transpose()
        .map_err(|msg| usage_error(&msg))?;

    let format_str = cli
        .format
        .as_deref()
        .or(config.default_format.as_deref())
        .unwrap_or("text");
    let output_format = OutputFormat::from_str(format_str).map_err(|msg| usage_error(&msg))?;

    let input = read_input(cli.path.as_deref())?;

    if input.trim().is_empty() {
        return Err(usage_error("no input to parse (empty or whitespace-only)"));
    }

    tracing::info!(
        format = %output_format_label(output_format),
        forced_dialect = ?cli.format_hint,
        output = ?cli.output,
        "swift-build-report starting"
    );

    let max_bytes = config.max_input_bytes;
    if input.len() as u64 > max_bytes {
        return Err(BuildReportError::Parse(ParseError::InputTooLarge {
            size: input.len() as u64,
            max_size: max_bytes,
        }));
    }

    let mut result = match format_hint {
        Some(format) => parser::parse_with_format(&input, format),
        None => parser::parse(&input),
    };

    apply_severity_filter(&mut result, cli.errors_only, cli.warnings_only);

    let rendered = format::render(&result, output_format, cli.minimal, config.color)?;

    write_output(cli.output.as_deref(), &rendered)
}

fn parse_format_hint(s: &str) -> Result<BuildFormat, String> {
    match s {
        "xcode" => Ok(BuildFormat::Xcode),
        "swift" => Ok(BuildFormat::Swift),
        "spm" => Ok(BuildFormat::Spm),
        other => Err(format!("unknown format-hint '{other}' (expected xcode|swift|spm)")),
    }
}

fn output_format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Summary => "summary",
        OutputFormat::Compact => "compact",
    }
}

/// View-only severity filter: narrows `result.diagnostics` for display
/// without touching `metrics`, which always reflect the full, unfiltered
/// report.
fn apply_severity_filter(result: &mut ParsedBuildResult, errors_only: bool, warnings_only: bool) {
    if !errors_only && !warnings_only {
        return;
    }
    result.diagnostics.retain(|d| {
        let keep_errors = errors_only && d.severity.is_error_like();
        let keep_warnings = warnings_only && d.severity == DiagnosticSeverity::Warning;
        keep_errors || keep_warnings
    });
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, BuildReportError> {
    let reads_stdin = match path {
        None => true,
        Some(p) => p == std::path::Path::new("-"),
    };

    if reads_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| BuildReportError::Io {
                path: PathBuf::from("-"),
                operation: "read stdin",
                source,
            })?;
        return Ok(buf);
    }

    let path = path.expect("reads_stdin is false only when path is Some");
    std::fs::read_to_string(path).map_err(|source| BuildReportError::Io {
        path: path.to_path_buf(),
        operation: "read input file",
        source,
    })
}

fn write_output(path: Option<&std::path::Path>, rendered: &str) -> Result<(), BuildReportError> {
    match path {
        None => {
            println!("{rendered}");
            Ok(())
        }
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(|source| BuildReportError::Io {
                path: path.to_path_buf(),
                operation: "create output file",
                source,
            })?;
            writeln!(file, "{rendered}").map_err(|source| BuildReportError::Io {
                path: path.to_path_buf(),
                operation: "write output file",
                source,
            })
        }
    }
}

fn usage_error(message: &str) -> BuildReportError {
    BuildReportError::Usage(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BuildStatus;

    #[test]
    fn test_apply_severity_filter_errors_only() {
        let mut result = parser::parse(
            "=== BUILD TARGET MyApp ===\n/path/File.swift:1:1: error: boom\n/path/File.swift:2:1: warning: careful\n** BUILD FAILED **",
        );
        apply_severity_filter(&mut result, true, false);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Error);
    }

    #[test]
    fn test_apply_severity_filter_errors_and_warnings_excludes_info() {
        let mut result = parser::parse(
            "=== BUILD TARGET MyApp ===\n/path/File.swift:1:1: error: boom\n/path/File.swift:2:1: warning: careful\n/path/File.swift:3:1: note: fyi\n** BUILD FAILED **",
        );
        apply_severity_filter(&mut result, true, true);
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_severity_filter_is_view_only_metrics_unaffected() {
        let mut result = parser::parse(
            "=== BUILD TARGET MyApp ===\n/path/File.swift:1:1: error: boom\n/path/File.swift:2:1: warning: careful\n** BUILD FAILED **",
        );
        let original_error_count = result.metrics.error_count;
        apply_severity_filter(&mut result, false, true);
        assert_eq!(result.metrics.error_count, original_error_count);
        assert_eq!(result.status, BuildStatus::Failed);
    }

    #[test]
    fn test_parse_format_hint_rejects_unknown() {
        assert!(parse_format_hint("yaml").is_err());
    }

    #[test]
    fn test_parse_format_hint_accepts_known() {
        assert_eq!(parse_format_hint("xcode").unwrap(), BuildFormat::Xcode);
    }

    fn blank_cli(path: PathBuf) -> Cli {
        Cli {
            path: Some(path),
            format: None,
            format_hint: None,
            errors_only: false,
            warnings_only: false,
            output: None,
            minimal: false,
            verbose: false,
            debug: false,
        }
    }

    #[test]
    fn test_empty_input_is_a_usage_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let cli = blank_cli(file.path().to_path_buf());
        let err = run_inner(&cli, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, BuildReportError::Usage(_)));
    }

    #[test]
    fn test_whitespace_only_input_is_a_usage_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"   \n\t\n").unwrap();
        let cli = blank_cli(file.path().to_path_buf());
        let err = run_inner(&cli, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, BuildReportError::Usage(_)));
    }

    #[test]
    fn test_nonempty_input_succeeds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"=== BUILD TARGET MyApp ===\n** BUILD SUCCEEDED **").unwrap();
        let cli = blank_cli(file.path().to_path_buf());
        assert!(run_inner(&cli, &CliConfig::default()).is_ok());
    }
}

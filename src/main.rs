// swift-build-report - main.rs
//
// Thin binary entry point: all behavior lives in the library crate so it
// can be exercised directly by integration tests.

fn main() {
    std::process::exit(swift_build_report::cli::run());
}

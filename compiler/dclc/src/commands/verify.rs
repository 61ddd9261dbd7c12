//! The `verify` command: check marker files against the checker's output.

use std::path::Path;

use crate::verify::{verify_path, Outcome, VerifyConfig};

use super::CliOptions;

/// Verify every marker file under `path`, printing one line per file and a
/// diff-style excerpt for each mismatch. Exits 1 on any failure.
pub fn verify_command(path: &str, options: &CliOptions) {
    let root = Path::new(path);
    if !root.exists() {
        eprintln!("cannot find '{path}'");
        std::process::exit(1);
    }

    let config = VerifyConfig {
        engines: options.engines,
        parallel: !options.sequential,
    };
    let summary = verify_path(root, &config);
    if summary.files.is_empty() {
        eprintln!("no .dcl files found under '{path}'");
        std::process::exit(1);
    }

    for file in &summary.files {
        match &file.outcome {
            Outcome::Passed => println!("ok      {}", file.path.display()),
            Outcome::Error(err) => println!("error   {}: {err}", file.path.display()),
            Outcome::Mismatch { expected, actual } => {
                println!("FAILED  {}", file.path.display());
                for (line, (want, got)) in expected.lines().zip(actual.lines()).enumerate() {
                    if want != got {
                        println!("  line {}:", line + 1);
                        println!("    expected: {want}");
                        println!("    actual:   {got}");
                    }
                }
            }
        }
    }

    println!();
    println!(
        "{} passed, {} failed ({:.2?})",
        summary.passed(),
        summary.failed(),
        summary.duration
    );
    if summary.has_failures() {
        std::process::exit(1);
    }
}

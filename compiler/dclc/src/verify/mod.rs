//! Marker-file verification.
//!
//! A marker file is a unit whose source carries the expected diagnostics
//! inline. Verifying it strips the markers, checks the clean source, renders
//! the result back as marker text and compares the two texts byte for byte.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dcl_check::{check_source, EngineMode};
use dcl_diagnostic::markers::{self, MarkerError};
use dcl_ir::{SharedInterner, StringInterner};
use rayon::prelude::*;

/// File extension of analysis units.
pub const UNIT_EXTENSION: &str = "dcl";

/// Verification settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Overrides each file's directives.
    pub engines: Option<EngineMode>,
    pub parallel: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        VerifyConfig {
            engines: None,
            parallel: true,
        }
    }
}

/// Why a file could not be verified at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    Read { message: String },
    Markers(MarkerError),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Read { message } => write!(f, "{message}"),
            VerifyError::Markers(err) => write!(f, "invalid markers: {err}"),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<MarkerError> for VerifyError {
    fn from(err: MarkerError) -> Self {
        VerifyError::Markers(err)
    }
}

/// Result of verifying one marker text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// The checker's marker text differs from the file's.
    Mismatch { expected: String, actual: String },
    Error(VerifyError),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// Outcome for one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Outcomes of a verification run, in path order.
#[derive(Clone, Debug, Default)]
pub struct VerifySummary {
    pub files: Vec<FileOutcome>,
    pub duration: Duration,
}

impl VerifySummary {
    pub fn passed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.passed()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Verify annotated marker text.
pub fn verify_text(
    annotated: &str,
    interner: &StringInterner,
    engines: Option<EngineMode>,
) -> Result<Outcome, MarkerError> {
    let parsed = markers::parse(annotated)?;
    let report = check_source(&parsed.source, interner, engines);
    let actual = markers::render(&parsed.source, &report.diagnostics);
    if actual == annotated {
        Ok(Outcome::Passed)
    } else {
        Ok(Outcome::Mismatch {
            expected: annotated.to_string(),
            actual,
        })
    }
}

/// Verify one marker file.
#[tracing::instrument(level = "debug", skip(interner))]
pub fn verify_file(path: &Path, interner: &StringInterner, engines: Option<EngineMode>) -> FileOutcome {
    let outcome = match fs::read_to_string(path) {
        Ok(text) => verify_text(&text, interner, engines)
            .unwrap_or_else(|err| Outcome::Error(err.into())),
        Err(e) => Outcome::Error(VerifyError::Read {
            message: crate::commands::describe_read_error(&path.display().to_string(), &e),
        }),
    };
    tracing::debug!(passed = outcome.is_pass(), "verified");
    FileOutcome {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Find marker files under `path`: the file itself, or every unit in a
/// directory tree, sorted by path.
pub fn discover_units(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return if has_unit_extension(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        };
    }
    let mut files = Vec::new();
    discover_recursive(path, &mut files);
    files.sort();
    files
}

fn has_unit_extension(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == UNIT_EXTENSION)
}

fn discover_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.') || name == "target")
        {
            continue;
        }
        if path.is_dir() {
            discover_recursive(&path, files);
        } else if has_unit_extension(&path) {
            files.push(path);
        }
    }
}

/// Verify every marker file under `path`.
///
/// All files share one interner. In parallel mode the work runs on a
/// scoped thread pool that is torn down before returning; if the pool
/// cannot be built the files are verified sequentially.
pub fn verify_path(path: &Path, config: &VerifyConfig) -> VerifySummary {
    let start = Instant::now();
    let files = discover_units(path);
    let interner: SharedInterner = Arc::new(StringInterner::new());
    let engines = config.engines;

    let run_sequential = |files: &[PathBuf]| -> Vec<FileOutcome> {
        files
            .iter()
            .map(|file| verify_file(file, &interner, engines))
            .collect()
    };

    let outcomes = if config.parallel && files.len() > 1 {
        rayon::ThreadPoolBuilder::new()
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    files
                        .par_iter()
                        .map(|file| verify_file(file, &interner, engines))
                        .collect::<Vec<_>>()
                })
            })
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                run_sequential(files.as_slice())
            })
    } else {
        run_sequential(files.as_slice())
    };

    VerifySummary {
        files: outcomes,
        duration: start.elapsed(),
    }
}

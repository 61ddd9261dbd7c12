//! Command handlers for the `dclc` CLI.
//!
//! Each submodule implements one command. Option parsing and `read_file`
//! are shared and live here.

use std::fmt;
use std::str::FromStr;

use dcl_check::EngineMode;
use dcl_diagnostic::emitter::ColorMode;

mod check;
mod explain;
mod verify;

pub use check::check_file;
pub use explain::explain_kind;
pub use verify::verify_command;

/// How `check` prints its diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One block per diagnostic, for people.
    #[default]
    Text,
    Json,
    /// The unit's source with inline `<!KIND!>` markers.
    Markers,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markers" => Ok(OutputFormat::Markers),
            _ => Err(format!(
                "unknown format `{s}` (expected `text`, `json` or `markers`)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markers => write!(f, "markers"),
        }
    }
}

/// Options shared by `check`, `markers` and `verify`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Overrides the engines a unit's directives ask for.
    pub engines: Option<EngineMode>,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// `verify` only: check files one at a time.
    pub sequential: bool,
    /// The first non-flag argument.
    pub path: Option<String>,
}

/// Parse command options.
///
/// Flags may appear before or after the path; only the first path counts.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    for arg in args {
        if let Some(engine) = arg.strip_prefix("--engine=") {
            options.engines = Some(engine.parse().map_err(|e| format!("{e}"))?);
        } else if let Some(format) = arg.strip_prefix("--format=") {
            options.format = format.parse()?;
        } else if arg == "--no-color" {
            options.color = ColorMode::Never;
        } else if arg == "--color" {
            options.color = ColorMode::Always;
        } else if arg == "--no-parallel" {
            options.sequential = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else if options.path.is_none() {
            options.path = Some(arg.clone());
        }
    }
    Ok(options)
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}", describe_read_error(path, &e));
            std::process::exit(1);
        }
    }
}

/// User-facing text for a failed read.
pub(crate) fn describe_read_error(path: &str, e: &std::io::Error) -> String {
    match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    }
}

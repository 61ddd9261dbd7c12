//! Checker configuration.

use std::fmt;
use std::str::FromStr;

use dcl_diagnostic::{DiagnosticKind, Engine};
use dcl_parse::Directives;
use rustc_hash::FxHashSet;

/// Which engines run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineMode {
    #[default]
    Both,
    OldOnly,
    NewOnly,
}

impl EngineMode {
    pub fn engines(self) -> &'static [Engine] {
        match self {
            EngineMode::Both => &Engine::ALL,
            EngineMode::OldOnly => &[Engine::Old],
            EngineMode::NewOnly => &[Engine::New],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineMode::Both => "both",
            EngineMode::OldOnly => "old",
            EngineMode::NewOnly => "new",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`EngineMode`] name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEngineMode(pub String);

impl fmt::Display for UnknownEngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown engine mode `{}` (expected `both`, `old` or `new`)",
            self.0
        )
    }
}

impl std::error::Error for UnknownEngineMode {}

impl FromStr for EngineMode {
    type Err = UnknownEngineMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" => Ok(EngineMode::Both),
            "old" | "oi" => Ok(EngineMode::OldOnly),
            "new" | "ni" => Ok(EngineMode::NewOnly),
            _ => Err(UnknownEngineMode(s.to_string())),
        }
    }
}

/// Checker configuration.
///
/// `Default` runs both engines and suppresses nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckConfig {
    pub engines: EngineMode,
    /// Kinds dropped from every report.
    pub suppressed: FxHashSet<DiagnosticKind>,
}

impl CheckConfig {
    /// Configuration requested by a unit's `// !` directives.
    pub fn from_directives(directives: &Directives) -> Self {
        let engines = match directives.new_inference {
            Some(true) => EngineMode::NewOnly,
            Some(false) => EngineMode::OldOnly,
            None => EngineMode::Both,
        };
        CheckConfig {
            engines,
            suppressed: directives.suppressed.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn with_engines(mut self, engines: EngineMode) -> Self {
        self.engines = engines;
        self
    }

    #[must_use]
    pub fn suppress(mut self, kind: DiagnosticKind) -> Self {
        self.suppressed.insert(kind);
        self
    }

    pub fn is_suppressed(&self, kind: DiagnosticKind) -> bool {
        self.suppressed.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_mode_parse() {
        assert_eq!("both".parse::<EngineMode>(), Ok(EngineMode::Both));
        assert_eq!("OLD".parse::<EngineMode>(), Ok(EngineMode::OldOnly));
        assert_eq!("ni".parse::<EngineMode>(), Ok(EngineMode::NewOnly));
        assert_eq!(
            "fast".parse::<EngineMode>(),
            Err(UnknownEngineMode("fast".to_string()))
        );
        assert_eq!(EngineMode::OldOnly.engines(), &[Engine::Old]);
        assert_eq!(EngineMode::Both.to_string(), "both");
    }

    #[test]
    fn test_from_directives() {
        let mut directives = Directives {
            with_new_inference: true,
            suppressed: vec![DiagnosticKind::UnsafeCall],
            ..Directives::default()
        };
        let config = CheckConfig::from_directives(&directives);
        assert_eq!(config.engines, EngineMode::Both);
        assert!(config.is_suppressed(DiagnosticKind::UnsafeCall));

        directives.new_inference = Some(true);
        assert_eq!(
            CheckConfig::from_directives(&directives).engines,
            EngineMode::NewOnly
        );
        directives.new_inference = Some(false);
        assert_eq!(
            CheckConfig::from_directives(&directives).engines,
            EngineMode::OldOnly
        );
    }

    #[test]
    fn test_builders() {
        let config = CheckConfig::default()
            .with_engines(EngineMode::NewOnly)
            .suppress(DiagnosticKind::TypeMismatch);
        assert_eq!(config.engines.engines(), &[Engine::New]);
        assert!(config.is_suppressed(DiagnosticKind::TypeMismatch));
        assert!(!config.is_suppressed(DiagnosticKind::Syntax));
    }
}

//! Configuration data model

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub global: GlobalConfig,
    /// Short name -> command text it expands to (e.g. `lv` -> `list views`)
    pub aliases: BTreeMap<String, String>,
}

impl Config {
    /// Expand the first token through the alias table.
    ///
    /// Only the leading token is considered; the alias text is split on
    /// whitespace and the remaining tokens are appended unchanged.
    pub fn expand_alias(&self, tokens: &[String]) -> Vec<String> {
        let Some((first, rest)) = tokens.split_first() else {
            return Vec::new();
        };

        match self.aliases.get(first) {
            Some(expansion) => expansion
                .split_whitespace()
                .map(str::to_string)
                .chain(rest.iter().cloned())
                .collect(),
            None => tokens.to_vec(),
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Default)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
    /// Overrides `$WAYFIRE_SOCKET` when set
    pub socket: Option<PathBuf>,
    pub table_style: TableStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Border style used when replies are rendered as a `Key | Value` table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// Unicode box drawing with a rule between every row
    #[default]
    FancyGrid,
    /// ASCII `+---+` borders with a rule between every row
    Grid,
    /// Header underline only
    Simple,
    /// No rules at all
    Plain,
}

impl std::str::FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fancy-grid" | "fancy" => Ok(Self::FancyGrid),
            "grid" => Ok(Self::Grid),
            "simple" => Ok(Self::Simple),
            "plain" => Ok(Self::Plain),
            _ => Err(format!(
                "Unknown table style: {} (expected fancy-grid, grid, simple or plain)",
                s
            )),
        }
    }
}

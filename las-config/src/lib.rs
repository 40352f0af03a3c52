//! LAS Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It is the shared configuration vocabulary of the reader, lexer, parser and CLI.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only has to
//! name the fields it changes.

use serde::Deserialize;

/// Top-level configuration for one parse
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LasConfig {
    /// Character stream settings
    pub reader: ReaderConfig,
    /// Lexer settings
    pub lexer: LexerConfig,
    /// Per-phase log levels
    pub log: LogConfig,
}

/// Configuration for the character stream reader
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReaderConfig {
    /// Capacity of the underlying `BufReader`, in bytes
    pub buffer_capacity: usize,
}

/// Configuration for the lexer
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LexerConfig {
    /// Capacity of the token queue between lexer and parser
    pub queue_capacity: usize,
}

/// Log verbosity, ordered from quietest to loudest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Log levels per phase; `None` falls back to `global`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub global: LogLevel,
    pub reader: Option<LogLevel>,
    pub lexer: Option<LogLevel>,
    pub parser: Option<LogLevel>,
}

/// Parse phase, used to pick log targets and levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Reader,
    Lexer,
    Parser,
    Cli,
}

impl Phase {
    /// All phases, in pipeline order
    pub const ALL: [Phase; 4] = [Phase::Reader, Phase::Lexer, Phase::Parser, Phase::Cli];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Reader => "reader",
            Phase::Lexer => "lexer",
            Phase::Parser => "parser",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("las::{}", self.as_str())
    }
}

impl LogLevel {
    /// Parse a level name, case-insensitively. `silent` maps to `Error`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        match phase {
            Phase::Reader => self.reader.unwrap_or(self.global),
            Phase::Lexer => self.lexer.unwrap_or(self.global),
            Phase::Parser => self.parser.unwrap_or(self.global),
            Phase::Cli => self.global,
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 8 * 1024,
        }
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self { queue_capacity: 3 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Warn,
            reader: None,
            lexer: None,
            parser: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = LasConfig::default();
        assert_eq!(cfg.reader.buffer_capacity, 8192);
        assert_eq!(cfg.lexer.queue_capacity, 3);
        assert_eq!(cfg.log.global, LogLevel::Warn);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Lexer.as_str(), "lexer");
        assert_eq!(Phase::Parser.target(), "las::parser");
        assert_eq!(Phase::ALL.len(), 4);
    }

    #[test]
    fn test_level_for_falls_back_to_global() {
        let cfg = LogConfig {
            global: LogLevel::Info,
            lexer: Some(LogLevel::Trace),
            ..LogConfig::default()
        };
        assert_eq!(cfg.level_for(Phase::Lexer), LogLevel::Trace);
        assert_eq!(cfg.level_for(Phase::Parser), LogLevel::Info);
        assert_eq!(cfg.level_for(Phase::Cli), LogLevel::Info);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let cfg: LasConfig =
            serde_json::from_str(r#"{ "reader": { "buffer_capacity": 64 }, "log": { "parser": "debug" } }"#)
                .unwrap();
        assert_eq!(cfg.reader.buffer_capacity, 64);
        assert_eq!(cfg.lexer, LexerConfig::default());
        assert_eq!(cfg.log.global, LogLevel::Warn);
        assert_eq!(cfg.log.level_for(Phase::Parser), LogLevel::Debug);
    }

    #[test]
    fn test_log_level_from_name() {
        assert_eq!(LogLevel::from_name("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_name("silent"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_name("loud"), None);
        assert!(LogLevel::Error < LogLevel::Trace);
    }
}

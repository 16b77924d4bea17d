//! Core configuration types.
//! - Config holds the run toggles with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::engine::{GlobTarget, OnConflict, TraversalConfig};
use crate::pattern::PatternMatcher;
use crate::replace::ReplaceMode;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rename files whose names contain a find variant
    pub rename_files: bool,
    /// Rename directories whose names contain a find variant
    pub rename_directories: bool,
    /// Replace inside file contents
    pub replace_contents: bool,
    /// Optional glob restricting which files are touched
    pub glob: Option<String>,
    /// If true, log actions but do not modify the filesystem
    pub dry_run: bool,
    pub mode: ReplaceMode,
    pub glob_target: GlobTarget,
    pub on_conflict: OnConflict,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rename_files: true,
            rename_directories: true,
            replace_contents: true,
            glob: None,
            dry_run: false,
            mode: ReplaceMode::default(),
            glob_target: GlobTarget::default(),
            on_conflict: OnConflict::default(),
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Build the engine settings backed by the real filesystem.
    /// Fails when the glob does not compile.
    pub fn traversal_config(&self) -> Result<TraversalConfig<'static>> {
        let mut tc = TraversalConfig::with_filesystem(self.mode);
        tc.rename_files = self.rename_files;
        tc.rename_directories = self.rename_directories;
        tc.replace_contents = self.replace_contents;
        tc.glob = PatternMatcher::new(self.glob.as_deref())?;
        tc.dry_run = self.dry_run;
        tc.glob_target = self.glob_target;
        tc.on_conflict = self.on_conflict;
        Ok(tc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RenameError;

    #[test]
    fn defaults_enable_everything() {
        let cfg = Config::default();
        assert!(cfg.rename_files && cfg.rename_directories && cfg.replace_contents);
        assert!(!cfg.dry_run);
        assert_eq!(cfg.mode, ReplaceMode::Sequential);
        assert_eq!(cfg.on_conflict, OnConflict::Fail);
        assert_eq!(cfg.glob_target, GlobTarget::Own);
    }

    #[test]
    fn traversal_config_carries_toggles() {
        let cfg = Config {
            rename_files: false,
            glob: Some("*.js".into()),
            dry_run: true,
            on_conflict: OnConflict::Skip,
            ..Config::default()
        };
        let tc = cfg.traversal_config().unwrap();
        assert!(!tc.rename_files);
        assert!(tc.rename_directories);
        assert!(tc.dry_run);
        assert_eq!(tc.glob.as_str(), Some("*.js"));
        assert_eq!(tc.on_conflict, OnConflict::Skip);
    }

    #[test]
    fn traversal_config_rejects_bad_glob() {
        let cfg = Config {
            glob: Some("[".into()),
            ..Config::default()
        };
        let err = cfg.traversal_config().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenameError>(),
            Some(RenameError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn log_level_parse_aliases() {
        assert_eq!(LogLevel::parse(" Verbose "), Some(LogLevel::Info));
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Quiet.to_string(), "quiet");
    }
}

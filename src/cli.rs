//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Boolean toggles only ever move a setting away from its default; values
//!   left unset keep what the XML config (or the built-in default) says.
//! - --debug is a shorthand for --log-level debug.

use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::engine::{GlobTarget, OnConflict};
use crate::replace::ReplaceMode;

/// Rename files and directories and rewrite their contents, replacing a phrase
/// in every casing style at once.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename and replace a phrase across a tree in every casing style"
)]
pub struct Args {
    /// Root of the tree to process (a directory or a single file).
    #[arg(value_name = "PATH", value_hint = ValueHint::AnyPath, required_unless_present_any = ["print_config", "init_config", "list"])]
    pub path: Option<PathBuf>,

    /// Phrase to search for.
    #[arg(short = 'f', long, value_name = "PHRASE", required_unless_present_any = ["print_config", "init_config"])]
    pub find: Option<String>,

    /// Phrase to replace it with.
    #[arg(short = 'r', long, value_name = "PHRASE", required_unless_present_any = ["print_config", "init_config"])]
    pub replace: Option<String>,

    /// Only rename/replace files matching this glob (e.g. "*.js").
    #[arg(short = 'g', long, value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Do not rename files.
    #[arg(long)]
    pub no_rename_files: bool,

    /// Do not rename directories.
    #[arg(long = "no-rename-dirs")]
    pub no_rename_dirs: bool,

    /// Do not replace inside file contents.
    #[arg(long)]
    pub no_replace: bool,

    /// Use the phrases verbatim instead of expanding them into case variants.
    #[arg(long)]
    pub literal: bool,

    /// Print the numbered find/replace pairs and exit.
    #[arg(long)]
    pub list: bool,

    /// Only apply the pairs with these indices (see --list), e.g. "0,3,5".
    #[arg(short = 's', long, value_name = "N,...", value_delimiter = ',')]
    pub select: Vec<usize>,

    /// How multiple pairs are applied: sequential | simultaneous.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ReplaceMode>,

    /// Test the glob against the parent directory when deciding file renames
    /// (behavior of older releases).
    #[arg(long)]
    pub legacy_glob: bool,

    /// What to do when a rename target exists: fail | skip.
    #[arg(long, value_name = "POLICY")]
    pub on_conflict: Option<OnConflict>,

    /// Show what would change, but do not modify files/directories.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON and print the run summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location in effect and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file at the config location and exit.
    #[arg(long, conflicts_with = "print_config")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Result<Option<LogLevel>> {
        if self.debug {
            return Ok(Some(LogLevel::Debug));
        }
        match self.log_level.as_deref() {
            None => Ok(None),
            Some(s) => s.parse::<LogLevel>().map(Some).map_err(anyhow::Error::msg),
        }
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<()> {
        if self.no_rename_files {
            cfg.rename_files = false;
        }
        if self.no_rename_dirs {
            cfg.rename_directories = false;
        }
        if self.no_replace {
            cfg.replace_contents = false;
        }
        if let Some(glob) = &self.glob {
            cfg.glob = Some(glob.clone());
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if self.legacy_glob {
            cfg.glob_target = GlobTarget::Legacy;
        }
        if let Some(policy) = self.on_conflict {
            cfg.on_conflict = policy;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(level) = self.effective_log_level()? {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        Ok(())
    }
}

pub fn parse() -> Args {
    Args::parse()
}

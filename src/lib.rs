//! Core library for `smart_rename`.
//!
//! Renames files and directories and rewrites file contents, replacing one
//! phrase with another in every casing style at once: a phrase pair such as
//! `CustomerAccess -> ClientAccess` expands into `customer_access ->
//! client_access`, `CUSTOMER-ACCESS -> CLIENT-ACCESS` and so on.
//!
//! Pipeline: [`PairSet::from_phrases`] (or [`PairSet::literal`]) builds the
//! pairs, [`PairSet::dedup`] drops repeated labels, [`PairSet::select`]
//! narrows them, and [`engine::run`] walks the tree with a
//! [`TraversalConfig`] carrying the toggles and the I/O collaborators.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod pairs;
pub mod pattern;
pub mod platform;
pub mod replace;
pub mod variants;

pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use engine::{run, EntryKind, GlobTarget, OnConflict, RenameAction, Summary, TraversalConfig};
pub use errors::RenameError;
pub use pairs::PairSet;
pub use pattern::PatternMatcher;
pub use replace::ReplaceMode;
pub use variants::case_variants;

//! Typed error definitions for smart_rename.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Everything else (plain I/O failures) travels as `anyhow::Error` with context
//! attached by `fs_ops::helpers`; callers downcast to `RenameError` when they
//! need to branch on one of these.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("find and replace lists differ in length: {find} find vs {replace} replace entries")]
    LengthMismatch { find: usize, replace: usize },

    #[error("Refusing to rename '{}' -> '{}': target already exists", from.display(), to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("The {0} phrase is empty")]
    EmptyPhrase(&'static str),

    #[error("Selected pair {index} is out of range (only {len} pairs available)")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Path not found: {0}")]
    NotFound(PathBuf),
}

impl RenameError {
    /// Short machine-friendly tag used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RenameError::LengthMismatch { .. } => "length_mismatch",
            RenameError::TargetExists { .. } => "target_exists",
            RenameError::InvalidGlob { .. } => "invalid_glob",
            RenameError::EmptyPhrase(_) => "empty_phrase",
            RenameError::SelectionOutOfRange { .. } => "selection_out_of_range",
            RenameError::NotFound(_) => "not_found",
        }
    }
}

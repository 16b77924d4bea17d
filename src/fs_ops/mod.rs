//! Filesystem collaborators for the engine: the real rename and the real
//! read-modify-write content replacement.

mod content;
pub mod helpers;
mod rename;

pub use content::{content_replacer, replace_in_file};
pub use helpers::io_error_with_help;
pub use rename::rename_no_clobber;

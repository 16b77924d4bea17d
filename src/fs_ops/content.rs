//! Default content-replacement collaborator.
//! Read the whole file, run the ordered replacement, write back only when
//! something changed so untouched files keep their timestamps.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::replace::{replace_all, ReplaceMode};

use super::helpers::io_error_with_help;

/// Replace in `path`; returns whether the file was rewritten.
pub fn replace_in_file(
    path: &Path,
    find: &[String],
    replace: &[String],
    mode: ReplaceMode,
) -> Result<bool> {
    let content = fs::read(path).map_err(io_error_with_help("read file", path))?;
    let out = replace_all(&content, find, replace, mode);
    if !out.changed {
        trace!(path = %path.display(), "no matches");
        return Ok(false);
    }
    fs::write(path, &out.content).map_err(io_error_with_help("write file", path))?;
    debug!(path = %path.display(), before = content.len(), after = out.content.len(), "content rewritten");
    Ok(true)
}

/// Bind `mode` into a closure with the replace-function shape the engine
/// expects.
pub fn content_replacer(mode: ReplaceMode) -> impl Fn(&Path, &[String], &[String]) -> Result<()> {
    move |path: &Path, find: &[String], replace: &[String]| replace_in_file(path, find, replace, mode).map(|_| ())
}

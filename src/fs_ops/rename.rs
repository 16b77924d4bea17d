//! Default rename collaborator.
//! Renames a file or directory and never replaces an existing target.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::errors::RenameError;
use crate::platform::{rename_no_replace, same_entry};

use super::helpers::io_error_with_help;

/// Rename `src` to `dest`.
///
/// Fails with [`RenameError::TargetExists`] when `dest` already exists, unless
/// `dest` is `src` itself under a different case (case-only rename on a
/// case-insensitive filesystem), which is performed as a plain rename.
pub fn rename_no_clobber(src: &Path, dest: &Path) -> Result<()> {
    let case_only = src != dest && same_entry(src, dest);
    if case_only {
        debug!(src = %src.display(), dest = %dest.display(), "case-only rename");
        return fs::rename(src, dest).map_err(|e| io_error_with_help("rename", src)(e));
    }

    match rename_no_replace(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(RenameError::TargetExists {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
        }
        .into()),
        Err(e) => Err(io_error_with_help("rename", src)(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn renames_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("CustomerAccess.js");
        src.write_str("x").unwrap();
        let dest = temp.child("ClientAccess.js");
        rename_no_clobber(src.path(), dest.path()).unwrap();
        assert!(!src.path().exists());
        dest.assert("x");
    }

    #[test]
    fn renames_directory_with_contents() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = temp.child("customeraccess");
        dir.create_dir_all().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        let dest = temp.child("clientaccess");
        rename_no_clobber(dir.path(), dest.path()).unwrap();
        assert!(!dir.path().exists());
        dest.child("a.txt").assert("a");
    }

    #[test]
    fn refuses_existing_target() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("a").unwrap();
        let dest = temp.child("b.txt");
        dest.write_str("b").unwrap();
        let err = rename_no_clobber(src.path(), dest.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenameError>(),
            Some(RenameError::TargetExists { .. })
        ));
        src.assert("a");
        dest.assert("b");
    }

    #[test]
    fn missing_source_reports_path() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = rename_no_clobber(&temp.path().join("gone"), &temp.path().join("new"))
            .unwrap_err();
        assert!(err.to_string().contains("gone"), "got: {err}");
    }
}

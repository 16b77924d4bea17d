//! I/O helper utilities.
//!
//! Provides a small adapter to enrich io::Error with actionable context/hints,
//! usable with map_err in anyhow::Result code paths.
//!
//! Usage:
//!   fs::read(path).map_err(io_error_with_help("read file", path))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been renamed earlier in this run)");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str(" (target already exists; remove it or pick another phrase)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process holds it open)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (resulting name too long; choose a shorter replacement)");
                }
                libc::ELOOP => {
                    msg.push_str(" (too many symbolic link levels; possible symlink cycle)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                80 | 183 => msg.push_str(" (target already exists)"), // FILE_EXISTS / ALREADY_EXISTS
                206 => msg.push_str(" (filename or path too long)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; verify it exists)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (target already exists)");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_operation_and_path() {
        let err = io_error_with_help("read file", Path::new("/nope/x.txt"))(io::Error::from(
            io::ErrorKind::NotFound,
        ));
        let msg = err.to_string();
        assert!(msg.starts_with("read file '/nope/x.txt'"), "got: {msg}");
        assert!(msg.contains("not found"), "got: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn os_code_is_reported() {
        let err = io_error_with_help("rename", Path::new("/x"))(io::Error::from_raw_os_error(
            libc::EACCES,
        ));
        let msg = err.to_string();
        assert!(msg.contains("permission denied"), "got: {msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::EACCES)), "got: {msg}");
    }
}

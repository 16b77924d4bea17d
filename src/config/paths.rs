//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Context, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file (or a directory holding config.xml).
pub const CONFIG_ENV: &str = "SMART_RENAME_CONFIG";

const APP_DIR: &str = "smart_rename";
const CONFIG_FILE: &str = "config.xml";

/// Config path in effect: `SMART_RENAME_CONFIG` if set, else the OS default.
///
/// A relative env value is resolved against the current directory; a value
/// naming an existing directory gets `config.xml` appended.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()
                .context("resolve current directory for relative config path")?
                .join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE);
        }
        return Ok(p);
    }

    if let Some(mut base) = config_dir() {
        base.push(APP_DIR);
        base.push(CONFIG_FILE);
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| anyhow!("could not determine a config directory (no config dir and HOME unset)"))
}

/// True when the config path comes from `SMART_RENAME_CONFIG`.
pub fn config_path_from_env() -> bool {
    env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty())
}

/// OS-appropriate default log file path (data dir). Suggested in the template.
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push(APP_DIR);
        base.push("smart_rename.log");
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join("smart_rename.log")
        })
        .ok_or_else(|| anyhow!("could not determine a data directory (no data dir and HOME unset)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

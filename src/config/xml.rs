//! XML configuration support.
//! - Loads defaults for the run toggles from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - A missing file at the OS default location is not an error; built-in defaults apply.
//! - A missing file named by SMART_RENAME_CONFIG is an error.
//! - Unknown XML fields and unparsable values fail the load with the file path attached.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use super::paths::{config_path_from_env, default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
use super::types::Config;

use crate::platform::write_config_secure_new_0600;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    rename_files: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    rename_directories: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    replace_contents: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
    glob: Option<String>,
    mode: Option<String>,
    glob_target: Option<String>,
    on_conflict: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Booleans are accepted with surrounding whitespace and a few common spellings.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_field<T>(raw: Option<&str>, field: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    match non_empty(raw) {
        None => Ok(None),
        Some(s) => match s.parse::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(e) => bail!("<{field}>: {e}"),
        },
    }
}

// Map XmlConfig -> Config; absent fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(v) = parsed.rename_files {
        cfg.rename_files = v;
    }
    if let Some(v) = parsed.rename_directories {
        cfg.rename_directories = v;
    }
    if let Some(v) = parsed.replace_contents {
        cfg.replace_contents = v;
    }
    if let Some(v) = parsed.dry_run {
        cfg.dry_run = v;
    }
    cfg.glob = non_empty(parsed.glob.as_deref()).map(str::to_string);
    if let Some(mode) = parse_field(parsed.mode.as_deref(), "mode")? {
        cfg.mode = mode;
    }
    if let Some(target) = parse_field(parsed.glob_target.as_deref(), "glob_target")? {
        cfg.glob_target = target;
    }
    if let Some(policy) = parse_field(parsed.on_conflict.as_deref(), "on_conflict")? {
        cfg.on_conflict = policy;
    }
    if let Some(level) = parse_field(parsed.log_level.as_deref(), "log_level")? {
        cfg.log_level = level;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config in effect.
///
/// Returns the config plus the file it came from; `(Config::default(), None)`
/// when no file exists at the default location.
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    let path = default_config_path()?;
    if !path.exists() {
        if config_path_from_env() {
            bail!("{CONFIG_ENV} points to '{}', which does not exist", path.display());
        }
        return Ok((Config::default(), None));
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok((cfg, Some(path)))
}

/// Create a default template config file and its parent directory.
/// Uses secure creation (no symlink following, never overwrites, mode 0600 on Unix).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing config at {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/smart_rename.log".into());

    let content = format!(
        "<!--\n  smart_rename configuration (XML)\n\n  Boolean flags (true/false):\n    rename_files        -> rename files whose names contain a find variant\n    rename_directories  -> rename directories whose names contain a find variant\n    replace_contents    -> replace inside file contents\n    dry_run             -> only report what would change\n\n  Other fields:\n    glob                -> only touch files matching this glob (empty = all files)\n    mode                -> sequential | simultaneous\n    glob_target         -> own | legacy\n    on_conflict         -> fail | skip\n    log_level           -> quiet | normal | info | debug\n    log_file            -> path to log file (optional), e.g. {}\n\n  Notes:\n    - CLI flags override XML values.\n    - Set {} to use a config file at another location.\n-->\n<config>\n  <rename_files>true</rename_files>\n  <rename_directories>true</rename_directories>\n  <replace_contents>true</replace_contents>\n  <dry_run>false</dry_run>\n  <glob></glob>\n  <mode>sequential</mode>\n  <glob_target>own</glob_target>\n  <on_conflict>fail</on_conflict>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n</config>\n",
        suggested_log, CONFIG_ENV
    );

    write_config_secure_new_0600(path, content.as_bytes())?;

    info!("Created template config at {}", path.display());
    Ok(())
}

//! Application orchestrator.
//! Loads/merges config, initializes logging, builds the phrase pairs and
//! invokes the engine, then reports what happened.

use anyhow::{anyhow, Result};
use tracing::{debug, error, info};

use smart_rename::cli::Args;
use smart_rename::config::{create_template_config, default_config_path, load_config, CONFIG_ENV};
use smart_rename::output as out;
use smart_rename::{engine, Config, PairSet, RenameError};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config / --init-config before logging init
    if args.print_config {
        return print_config();
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path).map_err(|e| {
            out::print_error(&format!("Could not write a template config: {e:#}"));
            e
        })?;
        out::print_success(&format!("A template smart_rename config was written to: {}", path.display()));
        out::print_info("Edit it to change the defaults; CLI flags still override it.");
        return Ok(());
    }

    // Config file values first, CLI flags on top.
    let (mut cfg, cfg_path) = load_config().map_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
        e
    })?;
    args.apply_overrides(&mut cfg)?;

    // Hold the guard until we return so the file writer flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!(config_file = ?cfg_path, ?cfg, "Starting smart_rename");

    let result = execute(&args, &cfg);
    if let Err(e) = &result {
        if let Some(re) = e.downcast_ref::<RenameError>() {
            error!(kind = re.kind(), error = %re, "smart_rename failed");
        } else {
            error!(error = %format!("{e:#}"), "smart_rename failed");
        }
    }
    result
}

fn execute(args: &Args, cfg: &Config) -> Result<()> {
    let find = phrase(args.find.as_deref(), "find")?;
    let replace = phrase(args.replace.as_deref(), "replace")?;

    let mut pairs = if args.literal {
        PairSet::literal(find, replace)
    } else {
        PairSet::from_phrases(find, replace).dedup()
    };
    if !args.select.is_empty() {
        pairs = pairs.select(&args.select)?;
    }

    if args.list {
        out::print_pair_list(&pairs);
        return Ok(());
    }

    let root = args
        .path
        .as_deref()
        .ok_or_else(|| anyhow!("a PATH is required unless --list is given"))?;
    let traversal = cfg.traversal_config()?;
    info!(
        root = %root.display(),
        pairs = pairs.len(),
        dry_run = cfg.dry_run,
        "Processing tree"
    );
    for pair in pairs.iter() {
        debug!(index = pair.index, label = %pair.label, "pair");
    }

    let summary = engine::run(root, pairs.find(), pairs.replace(), &traversal)?;
    if args.json {
        out::print_summary_json(&summary)?;
    } else {
        out::print_summary(&summary);
    }
    Ok(())
}

fn phrase<'a>(raw: Option<&'a str>, which: &'static str) -> Result<&'a str> {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(RenameError::EmptyPhrase(which).into()),
    }
}

fn print_config() -> Result<()> {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return Ok(());
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default smart_rename config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
    Ok(())
}

//! User-facing output.
//! Colored prefixes when the stream is a TTY, plain text otherwise so the
//! listing and summary lines stay easy to script against.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::engine::{EntryKind, Summary};
use crate::pairs::PairSet;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One numbered line per pair: `  3  customer_access -> client_access`.
/// The numbers are the indices `--select` accepts.
pub fn format_pair_list(pairs: &PairSet) -> Vec<String> {
    let width = pairs.len().saturating_sub(1).to_string().len();
    pairs
        .iter()
        .map(|p| format!("{:>width$}  {}", p.index, p.label, width = width))
        .collect()
}

pub fn print_pair_list(pairs: &PairSet) {
    for line in format_pair_list(pairs) {
        print_user(&line);
    }
}

/// Lines describing a finished run, one per action, followed by a tally.
pub fn format_summary(summary: &Summary) -> Vec<String> {
    let verb = if summary.dry_run { "would rename" } else { "renamed" };
    let mut lines = Vec::new();
    if summary.is_empty() {
        lines.push("nothing matched".to_string());
    }
    for a in &summary.renamed {
        lines.push(format!("{verb}: {} -> {}", a.from.display(), a.to.display()));
    }
    for a in &summary.conflicts {
        lines.push(format!("skipped (target exists): {} -> {}", a.from.display(), a.to.display()));
    }
    let replaced = if summary.dry_run { "would replace in" } else { "replaced in" };
    for p in &summary.replaced {
        lines.push(format!("{replaced}: {}", p.display()));
    }
    lines.push(format!(
        "{} director{}, {} file{} renamed; {} file{} processed; {} conflict{}{}",
        summary.renamed_count(EntryKind::Directory),
        if summary.renamed_count(EntryKind::Directory) == 1 { "y" } else { "ies" },
        summary.renamed_count(EntryKind::File),
        plural(summary.renamed_count(EntryKind::File)),
        summary.replaced.len(),
        plural(summary.replaced.len()),
        summary.conflicts.len(),
        plural(summary.conflicts.len()),
        if summary.dry_run { " (dry run)" } else { "" },
    ));
    lines
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn print_summary(summary: &Summary) {
    let mut lines = format_summary(summary);
    let tally = lines.pop();
    for line in lines {
        print_user(&line);
    }
    if let Some(tally) = tally {
        print_success(&tally);
    }
}

/// The summary as a single JSON object on stdout, for `--json` runs.
pub fn print_summary_json(summary: &Summary) -> Result<()> {
    print_user(&serde_json::to_string(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RenameAction;
    use std::path::PathBuf;

    #[test]
    fn pair_list_is_numbered_from_zero_and_aligned() {
        let pairs = PairSet::from_phrases("CustomerAccess", "ClientAccess").dedup();
        let lines = format_pair_list(&pairs);
        assert_eq!(lines.len(), pairs.len());
        assert_eq!(lines[0], " 0  CustomerAccess -> ClientAccess");
        assert!(lines[10].starts_with("10  "), "got: {}", lines[10]);
    }

    #[test]
    fn dry_run_summary_uses_conditional_wording() {
        let summary = Summary {
            dry_run: true,
            renamed: vec![RenameAction {
                from: PathBuf::from("a/foo"),
                to: PathBuf::from("a/bar"),
                kind: EntryKind::Directory,
            }],
            replaced: vec![PathBuf::from("a/foo/x.txt")],
            conflicts: vec![],
        };
        let lines = format_summary(&summary);
        assert_eq!(lines[0], "would rename: a/foo -> a/bar");
        assert_eq!(lines[1], "would replace in: a/foo/x.txt");
        assert_eq!(
            lines[2],
            "1 directory, 0 files renamed; 1 file processed; 0 conflicts (dry run)"
        );
    }

    #[test]
    fn empty_summary_says_nothing_matched() {
        let lines = format_summary(&Summary::default());
        assert_eq!(
            lines,
            vec![
                "nothing matched".to_string(),
                "0 directories, 0 files renamed; 0 files processed; 0 conflicts".to_string(),
            ]
        );
    }
}

//! Recursive rename/replace engine.
//!
//! Walks a tree depth-first and pre-order: each entry is renamed (when its name
//! contains a find pattern and renaming is enabled for its kind) before a
//! directory's children are visited, and files are handed to the replace
//! function afterwards. Nothing about the tree is cached; every entry is
//! stat-ed when it is visited because earlier renames change what exists.
//!
//! The actual rename and content rewrite are injected through
//! [`TraversalConfig`], so dry runs and tests can swap them out. Any error from
//! a collaborator aborts the walk; work done so far is not undone.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, trace, warn};

use crate::errors::RenameError;
use crate::fs_ops::{content_replacer, io_error_with_help, rename_no_clobber};
use crate::pattern::PatternMatcher;
use crate::replace::{replace_str, ReplaceMode};

/// `(src, dest)`: rename one entry. Must fail rather than replace `dest`.
pub type RenameFn<'a> = Box<dyn Fn(&Path, &Path) -> Result<()> + 'a>;
/// `(path, find, replace)`: rewrite the content of one file.
pub type ReplaceFn<'a> = Box<dyn Fn(&Path, &[String], &[String]) -> Result<()> + 'a>;

/// Which path the glob is tested against when deciding whether a file may be
/// renamed. Content replacement always tests the file's final path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobTarget {
    /// The file's own path after the rename.
    #[default]
    Own,
    /// The root's original path for the root, the parent directory's path for
    /// children (older releases behaved this way).
    Legacy,
}

impl GlobTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "own" | "self" => Some(GlobTarget::Own),
            "legacy" | "parent" => Some(GlobTarget::Legacy),
            _ => None,
        }
    }
}

impl fmt::Display for GlobTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GlobTarget::Own => "own",
            GlobTarget::Legacy => "legacy",
        })
    }
}

impl FromStr for GlobTarget {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid glob target: '{s}'"))
    }
}

/// What to do when a rename target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    /// Abort the whole run with the rename error.
    #[default]
    Fail,
    /// Leave the entry under its old name, record the conflict and go on.
    Skip,
}

impl OnConflict {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "abort" | "error" => Some(OnConflict::Fail),
            "skip" | "continue" => Some(OnConflict::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnConflict::Fail => "fail",
            OnConflict::Skip => "skip",
        })
    }
}

impl FromStr for OnConflict {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid conflict policy: '{s}'"))
    }
}

/// Settings for one traversal. Always carries both collaborators.
pub struct TraversalConfig<'a> {
    pub rename_files: bool,
    pub rename_directories: bool,
    pub replace_contents: bool,
    pub glob: PatternMatcher,
    pub dry_run: bool,
    pub mode: ReplaceMode,
    pub glob_target: GlobTarget,
    pub on_conflict: OnConflict,
    pub rename_fn: RenameFn<'a>,
    pub replace_fn: ReplaceFn<'a>,
}

impl<'a> TraversalConfig<'a> {
    /// Everything enabled, no glob, not a dry run.
    pub fn new(rename_fn: RenameFn<'a>, replace_fn: ReplaceFn<'a>) -> Self {
        Self {
            rename_files: true,
            rename_directories: true,
            replace_contents: true,
            glob: PatternMatcher::any(),
            dry_run: false,
            mode: ReplaceMode::default(),
            glob_target: GlobTarget::default(),
            on_conflict: OnConflict::default(),
            rename_fn,
            replace_fn,
        }
    }
}

impl TraversalConfig<'static> {
    /// Config backed by the real filesystem collaborators, content replacement
    /// bound to `mode`.
    pub fn with_filesystem(mode: ReplaceMode) -> Self {
        let mut cfg = Self::new(Box::new(rename_no_clobber), Box::new(content_replacer(mode)));
        cfg.mode = mode;
        cfg
    }
}

impl fmt::Debug for TraversalConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalConfig")
            .field("rename_files", &self.rename_files)
            .field("rename_directories", &self.rename_directories)
            .field("replace_contents", &self.replace_contents)
            .field("glob", &self.glob.as_str())
            .field("dry_run", &self.dry_run)
            .field("mode", &self.mode)
            .field("glob_target", &self.glob_target)
            .field("on_conflict", &self.on_conflict)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    fn of(meta: &Metadata) -> Option<Self> {
        if meta.is_dir() {
            Some(EntryKind::Directory)
        } else if meta.is_file() {
            Some(EntryKind::File)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameAction {
    pub from: PathBuf,
    pub to: PathBuf,
    pub kind: EntryKind,
}

/// What a run did; in a dry run, what it would have done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub dry_run: bool,
    /// Renames in the order they were issued.
    pub renamed: Vec<RenameAction>,
    /// Files handed to the replace function (whether or not they changed).
    pub replaced: Vec<PathBuf>,
    /// Renames skipped because the target existed (`OnConflict::Skip`).
    pub conflicts: Vec<RenameAction>,
}

impl Summary {
    pub fn renamed_count(&self, kind: EntryKind) -> usize {
        self.renamed.iter().filter(|a| a.kind == kind).count()
    }

    /// Nothing was renamed, replaced or skipped.
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.replaced.is_empty() && self.conflicts.is_empty()
    }
}

/// Rename and replace under `root`.
///
/// `find` and `replace` are index-aligned; a length mismatch is rejected
/// before the filesystem is touched. `root` may be a directory or a single
/// file.
pub fn run(root: &Path, find: &[String], replace: &[String], config: &TraversalConfig<'_>) -> Result<Summary> {
    if find.len() != replace.len() {
        return Err(RenameError::LengthMismatch {
            find: find.len(),
            replace: replace.len(),
        }
        .into());
    }
    debug!(root = %root.display(), pairs = find.len(), ?config, "starting traversal");

    let mut walker = Walker {
        find,
        replace,
        config,
        summary: Summary {
            dry_run: config.dry_run,
            ..Summary::default()
        },
    };
    walker.visit_root(root)?;
    Ok(walker.summary)
}

struct Walker<'r, 'a> {
    find: &'r [String],
    replace: &'r [String],
    config: &'r TraversalConfig<'a>,
    summary: Summary,
}

impl Walker<'_, '_> {
    fn visit_root(&mut self, root: &Path) -> Result<()> {
        let meta = fs::metadata(root).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                anyhow::Error::from(RenameError::NotFound(root.to_path_buf()))
            } else {
                io_error_with_help("stat", root)(e)
            }
        })?;
        let Some(kind) = EntryKind::of(&meta) else {
            debug!(path = %root.display(), "root is neither a file nor a directory; nothing to do");
            return Ok(());
        };

        let root = self.maybe_rename(root, kind, None)?;
        match kind {
            EntryKind::Directory => self.walk_dir(&root),
            EntryKind::File => self.maybe_replace(&root),
        }
    }

    fn walk_dir(&mut self, dir: &Path) -> Result<()> {
        // Snapshot the listing first: siblings are renamed while we iterate.
        let children = fs::read_dir(dir)
            .and_then(|rd| rd.map(|e| e.map(|e| e.path())).collect::<io::Result<Vec<_>>>())
            .map_err(io_error_with_help("list directory", dir))?;
        trace!(dir = %dir.display(), entries = children.len(), "walking directory");

        for child in children {
            let meta = fs::metadata(&child).map_err(io_error_with_help("stat", &child))?;
            let Some(kind) = EntryKind::of(&meta) else {
                debug!(path = %child.display(), "skipping special file");
                continue;
            };
            let path = self.maybe_rename(&child, kind, Some(dir))?;
            match kind {
                EntryKind::Directory => self.walk_dir(&path)?,
                EntryKind::File => self.maybe_replace(&path)?,
            }
        }
        Ok(())
    }

    /// Rename `path` when its name changes and it is eligible. Every occurrence
    /// of a pattern in the name is replaced, not only the first (`foo_foo`
    /// becomes `bar_bar`). Returns the path traversal should continue with: the
    /// new one after a real rename, the original one otherwise (including dry
    /// runs and skipped conflicts).
    fn maybe_rename(&mut self, path: &Path, kind: EntryKind, parent: Option<&Path>) -> Result<PathBuf> {
        let Some(name) = path.file_name() else {
            return Ok(path.to_path_buf());
        };
        let Some(name) = name.to_str() else {
            debug!(path = %path.display(), "name is not valid UTF-8; not renaming");
            return Ok(path.to_path_buf());
        };

        let (new_name, changed) = replace_str(name, self.find, self.replace, self.config.mode);
        if !changed || new_name == name {
            return Ok(path.to_path_buf());
        }
        if new_name.is_empty() || new_name.chars().any(std::path::is_separator) {
            warn!(path = %path.display(), new_name = %new_name, "replacement yields an unusable name; not renaming");
            return Ok(path.to_path_buf());
        }

        let new_path = path.with_file_name(&new_name);
        if !self.rename_eligible(kind, path, &new_path, parent) {
            trace!(path = %path.display(), ?kind, "rename not enabled for this entry");
            return Ok(path.to_path_buf());
        }

        let action = RenameAction {
            from: path.to_path_buf(),
            to: new_path.clone(),
            kind,
        };
        if self.config.dry_run {
            info!(from = %path.display(), to = %new_path.display(), ?kind, "dry-run: would rename");
            self.summary.renamed.push(action);
            return Ok(path.to_path_buf());
        }

        match (self.config.rename_fn)(path, &new_path) {
            Ok(()) => {
                info!(from = %path.display(), to = %new_path.display(), ?kind, "renamed");
                self.summary.renamed.push(action);
                Ok(new_path)
            }
            Err(e) if self.config.on_conflict == OnConflict::Skip && is_target_exists(&e) => {
                warn!(from = %path.display(), to = %new_path.display(), "target exists; leaving entry as is");
                self.summary.conflicts.push(action);
                Ok(path.to_path_buf())
            }
            Err(e) => Err(e),
        }
    }

    fn rename_eligible(&self, kind: EntryKind, old: &Path, new: &Path, parent: Option<&Path>) -> bool {
        match kind {
            EntryKind::Directory => self.config.rename_directories,
            EntryKind::File => {
                let glob_path = match self.config.glob_target {
                    GlobTarget::Own => new,
                    GlobTarget::Legacy => parent.unwrap_or(old),
                };
                self.config.rename_files && self.config.glob.matches(glob_path)
            }
        }
    }

    fn maybe_replace(&mut self, path: &Path) -> Result<()> {
        if !self.config.replace_contents {
            return Ok(());
        }
        if !self.config.glob.matches(path) {
            trace!(path = %path.display(), "glob excludes file from replacement");
            return Ok(());
        }
        if self.config.dry_run {
            info!(path = %path.display(), "dry-run: would replace in file");
        } else {
            (self.config.replace_fn)(path, self.find, self.replace)?;
            debug!(path = %path.display(), "replaced in file");
        }
        self.summary.replaced.push(path.to_path_buf());
        Ok(())
    }
}

fn is_target_exists(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<RenameError>(), Some(RenameError::TargetExists { .. }))
        || e.downcast_ref::<io::Error>()
            .is_some_and(|io| io.kind() == io::ErrorKind::AlreadyExists)
}

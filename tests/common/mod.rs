#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fixture tree shipped with the tests (`customeraccess/` with two JS files).
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("customeraccess")
}

/// Copy `src` recursively into `dest_parent/<name of src>`; returns the copy's root.
pub fn copy_tree(src: &Path, dest_parent: &Path) -> PathBuf {
    let root = dest_parent.join(src.file_name().unwrap());
    for entry in WalkDir::new(src) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(src).unwrap();
        let target = root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    root
}

/// Copy of the fixture under `dest_parent/customeraccess`.
pub fn fixture_copy(dest_parent: &Path) -> PathBuf {
    copy_tree(&fixture_dir(), dest_parent)
}

/// Every entry below `base` keyed by relative path; directories map to `None`,
/// files to their bytes.
pub fn snapshot(base: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(base)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            let rel = e.path().strip_prefix(base).unwrap().to_path_buf();
            let body = e.file_type().is_file().then(|| fs::read(e.path()).unwrap());
            (rel, body)
        })
        .collect()
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

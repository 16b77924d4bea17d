//! Ordered literal substring replacement over byte buffers.
//!
//! Two modes:
//! - `Sequential`: pairs are applied one after another; pair `i + 1` scans the
//!   output of pair `i`, so it can match text that pair `i` inserted.
//! - `Simultaneous`: a single pass over the original input; at each position
//!   the first pair (in order) whose pattern matches wins, and inserted text is
//!   never scanned again.
//!
//! Empty patterns never match.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    #[default]
    Sequential,
    Simultaneous,
}

impl ReplaceMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "cascade" => Some(ReplaceMode::Sequential),
            "simultaneous" | "parallel" | "single-pass" => Some(ReplaceMode::Simultaneous),
            _ => None,
        }
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReplaceMode::Sequential => "sequential",
            ReplaceMode::Simultaneous => "simultaneous",
        })
    }
}

impl FromStr for ReplaceMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid replace mode: '{s}'"))
    }
}

/// Result of a replacement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub content: Vec<u8>,
    pub changed: bool,
}

/// Replace every `find[i]` with `replace[i]` in `content`.
///
/// Pairs are taken by index; extra entries in the longer slice are ignored, so
/// callers that need the lengths to agree must check that first.
pub fn replace_all<F, R>(content: &[u8], find: &[F], replace: &[R], mode: ReplaceMode) -> Replaced
where
    F: AsRef<[u8]>,
    R: AsRef<[u8]>,
{
    match mode {
        ReplaceMode::Sequential => {
            let mut current = content.to_vec();
            let mut changed = false;
            for (f, r) in find.iter().zip(replace) {
                if let Some(next) = replace_one(&current, f.as_ref(), r.as_ref()) {
                    current = next;
                    changed = true;
                }
            }
            Replaced {
                content: current,
                changed,
            }
        }
        ReplaceMode::Simultaneous => replace_single_pass(content, find, replace),
    }
}

/// `&str` convenience over [`replace_all`]; used for file and directory names.
pub fn replace_str<F, R>(s: &str, find: &[F], replace: &[R], mode: ReplaceMode) -> (String, bool)
where
    F: AsRef<str>,
    R: AsRef<str>,
{
    let find: Vec<&[u8]> = find.iter().map(|f| f.as_ref().as_bytes()).collect();
    let replace: Vec<&[u8]> = replace.iter().map(|r| r.as_ref().as_bytes()).collect();
    let out = replace_all(s.as_bytes(), &find, &replace, mode);
    if !out.changed {
        return (s.to_string(), false);
    }
    // UTF-8 needles only match on char boundaries of a UTF-8 haystack, and the
    // inserted text is UTF-8, so the result is valid UTF-8.
    match String::from_utf8(out.content) {
        Ok(s) => (s, true),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    }
}

/// One streaming scan for a single pattern. Returns `None` when nothing matched.
fn replace_one(haystack: &[u8], needle: &[u8], with: &[u8]) -> Option<Vec<u8>> {
    if needle.is_empty() {
        return None;
    }
    let mut first = find_from(haystack, needle, 0)?;
    let mut out = Vec::with_capacity(haystack.len());
    let mut copied_to = 0;
    loop {
        out.extend_from_slice(&haystack[copied_to..first]);
        out.extend_from_slice(with);
        copied_to = first + needle.len();
        match find_from(haystack, needle, copied_to) {
            Some(next) => first = next,
            None => break,
        }
    }
    out.extend_from_slice(&haystack[copied_to..]);
    Some(out)
}

fn replace_single_pass<F, R>(content: &[u8], find: &[F], replace: &[R]) -> Replaced
where
    F: AsRef<[u8]>,
    R: AsRef<[u8]>,
{
    let mut out = Vec::with_capacity(content.len());
    let mut changed = false;
    let mut pos = 0;
    let mut copied_to = 0;
    while pos < content.len() {
        let hit = find
            .iter()
            .zip(replace)
            .map(|(f, r)| (f.as_ref(), r.as_ref()))
            .find(|(f, _)| !f.is_empty() && content[pos..].starts_with(f));
        match hit {
            Some((f, r)) => {
                out.extend_from_slice(&content[copied_to..pos]);
                out.extend_from_slice(r);
                pos += f.len();
                copied_to = pos;
                changed = true;
            }
            None => pos += 1,
        }
    }
    out.extend_from_slice(&content[copied_to..]);
    Replaced {
        content: out,
        changed,
    }
}

fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

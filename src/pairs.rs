//! Find/replace pair sets.
//!
//! A pair set is kept as three parallel vectors (find, replace, label) so the
//! engine can take the find and replace lists as plain slices. Every operation
//! here keeps the three vectors the same length and index-aligned.

use std::collections::HashSet;

use anyhow::Result;
use serde::Serialize;

use crate::errors::RenameError;
use crate::variants::case_variants;

/// Display label of a pair, e.g. `CustomerAccess -> ClientAccess`.
pub fn label(find: &str, replace: &str) -> String {
    format!("{find} -> {replace}")
}

/// Drop every pair whose label was already seen earlier in the sequence.
///
/// The first occurrence of a label survives; removal is applied to all three
/// vectors at the same index, and the order of survivors is preserved.
pub fn dedup_by_label(
    find: Vec<String>,
    replace: Vec<String>,
    labels: Vec<String>,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut out_find = Vec::with_capacity(labels.len());
    let mut out_replace = Vec::with_capacity(labels.len());
    let mut out_labels = Vec::with_capacity(labels.len());

    for ((f, r), l) in find.into_iter().zip(replace).zip(labels) {
        if seen.contains(&l) {
            continue;
        }
        seen.insert(l.clone());
        out_find.push(f);
        out_replace.push(r);
        out_labels.push(l);
    }
    (out_find, out_replace, out_labels)
}

/// A borrowed view of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pair<'a> {
    pub index: usize,
    pub find: &'a str,
    pub replace: &'a str,
    pub label: &'a str,
}

/// Ordered, index-aligned find/replace/label vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSet {
    find: Vec<String>,
    replace: Vec<String>,
    labels: Vec<String>,
}

impl PairSet {
    /// Build from parallel vectors; labels are derived from the pairs.
    pub fn new(find: Vec<String>, replace: Vec<String>) -> Result<Self> {
        if find.len() != replace.len() {
            return Err(RenameError::LengthMismatch {
                find: find.len(),
                replace: replace.len(),
            }
            .into());
        }
        let labels = find.iter().zip(&replace).map(|(f, r)| label(f, r)).collect();
        Ok(Self { find, replace, labels })
    }

    /// Expand both phrases into their case variants and pair them by index.
    /// The result is not de-duplicated; call [`PairSet::dedup`] for that.
    pub fn from_phrases(find_phrase: &str, replace_phrase: &str) -> Self {
        let find = case_variants(find_phrase);
        let replace = case_variants(replace_phrase);
        let labels = find.iter().zip(&replace).map(|(f, r)| label(f, r)).collect();
        Self { find, replace, labels }
    }

    /// A single pair taken verbatim, without case expansion.
    pub fn literal(find: &str, replace: &str) -> Self {
        Self {
            find: vec![find.to_string()],
            replace: vec![replace.to_string()],
            labels: vec![label(find, replace)],
        }
    }

    /// Remove later duplicates by label (see [`dedup_by_label`]).
    pub fn dedup(self) -> Self {
        let (find, replace, labels) = dedup_by_label(self.find, self.replace, self.labels);
        Self { find, replace, labels }
    }

    /// Keep only the pairs at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let mut out = Self::default();
        for &index in indices {
            if index >= self.len() {
                return Err(RenameError::SelectionOutOfRange {
                    index,
                    len: self.len(),
                }
                .into());
            }
            out.find.push(self.find[index].clone());
            out.replace.push(self.replace[index].clone());
            out.labels.push(self.labels[index].clone());
        }
        Ok(out)
    }

    pub fn find(&self) -> &[String] {
        &self.find
    }

    pub fn replace(&self) -> &[String] {
        &self.replace
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.find.len()
    }

    pub fn is_empty(&self) -> bool {
        self.find.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pair<'_>> {
        self.find
            .iter()
            .zip(&self.replace)
            .zip(&self.labels)
            .enumerate()
            .map(|(index, ((find, replace), label))| Pair {
                index,
                find,
                replace,
                label,
            })
    }
}

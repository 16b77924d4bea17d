//! Glob filter for the engine.
//! A pattern without a path separator is matched against the last path segment
//! only, so `*.js` selects JavaScript files at any depth.

use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::path::Path;

use crate::errors::RenameError;

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    pattern: Option<Pattern>,
    base_name_only: bool,
}

impl PatternMatcher {
    /// Compile `pattern`; `None` or an empty string yields a matcher that
    /// accepts every path.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let Some(raw) = pattern.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(Self::default());
        };
        let compiled = Pattern::new(raw).map_err(|e| RenameError::InvalidGlob {
            pattern: raw.to_string(),
            reason: e.msg.to_string(),
        })?;
        Ok(Self {
            pattern: Some(compiled),
            base_name_only: !raw.contains('/') && !raw.contains(std::path::MAIN_SEPARATOR),
        })
    }

    /// Matcher that accepts everything.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Pattern::as_str)
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        if self.base_name_only {
            match path.file_name() {
                Some(name) => pattern.matches_with(&name.to_string_lossy(), OPTIONS),
                None => false,
            }
        } else {
            pattern.matches_path_with(path, OPTIONS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pattern_matches_everything() {
        let m = PatternMatcher::new(None).unwrap();
        assert_eq!(m.as_str(), None);
        assert!(m.matches(Path::new("/any/thing.txt")));
        assert!(PatternMatcher::new(Some("  ")).unwrap().matches(Path::new("x")));
    }

    #[test]
    fn bare_pattern_matches_base_name_at_any_depth() {
        let m = PatternMatcher::new(Some("*.js")).unwrap();
        assert!(m.matches(Path::new("a.js")));
        assert!(m.matches(Path::new("/deep/nested/dir/a.js")));
        assert!(!m.matches(Path::new("/deep/nested/dir/a.ts")));
        assert!(!m.matches(Path::new("/deep/a.js/child.ts")));
    }

    #[test]
    fn question_mark_and_classes() {
        let m = PatternMatcher::new(Some("file?.[ch]")).unwrap();
        assert!(m.matches(Path::new("src/file1.c")));
        assert!(m.matches(Path::new("src/fileA.h")));
        assert!(!m.matches(Path::new("src/file10.c")));
        assert!(!m.matches(Path::new("src/file1.rs")));
    }

    #[test]
    fn star_does_not_match_leading_dot() {
        let m = PatternMatcher::new(Some("*.js")).unwrap();
        assert!(!m.matches(Path::new("/p/.hidden.js")));
    }

    #[cfg(unix)]
    #[test]
    fn pattern_with_separator_matches_whole_path() {
        let m = PatternMatcher::new(Some("src/*.rs")).unwrap();
        assert!(m.matches(Path::new("src/lib.rs")));
        assert!(!m.matches(Path::new("other/src/lib.rs")));
        assert!(!m.matches(Path::new("src/nested/lib.rs")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = PatternMatcher::new(Some("[abc")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenameError>(),
            Some(RenameError::InvalidGlob { .. })
        ));
    }
}

//! Case variant generation.
//!
//! A phrase such as `"Customer Access"`, `"customer-access"` or `"customerAccess"`
//! is first reduced to a compact Pascal-like token (`CustomerAccess`), then run
//! through a fixed catalog of 16 casing transforms. The position of a variant in
//! the output is its only identity: variant `i` of the find phrase is always
//! paired with variant `i` of the replace phrase.
//!
//! Tokenizing rule (everything downstream depends on it):
//! - runs of `-`, `_` and whitespace separate tokens;
//! - a lowercase letter immediately followed by an uppercase letter is a token
//!   boundary (`customerAccess` -> `customer`, `Access`);
//! - empty tokens are dropped, and every token gets its first character
//!   uppercased before the tokens are concatenated.

use unicode_normalization::UnicodeNormalization;

/// Number of variants produced for every phrase.
pub const VARIANT_COUNT: usize = 16;

/// The transform catalog, in output order. Each entry is applied to the compact
/// token produced by [`compact`].
pub const TRANSFORMS: [fn(&str) -> String; VARIANT_COUNT] = [
    camelize,
    lower_camelize,
    capitalize,
    capitalize_lowered,
    decapitalize,
    underscored,
    classify,
    slugify,
    dasherize_trimmed,
    titleize,
    spaced,
    spaced_lower,
    lowercase,
    uppercase,
    underscored_upper,
    spaced_upper,
];

/// Generate the 16 casing variants of `phrase`.
pub fn case_variants(phrase: &str) -> Vec<String> {
    let s = compact(phrase);
    TRANSFORMS.iter().map(|t| t(&s)).collect()
}

/// Split a phrase into tokens (see module docs for the exact rule).
pub fn tokenize(phrase: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in phrase.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if let Some(p) = prev
            && p.is_lowercase()
            && c.is_uppercase()
            && !current.is_empty()
        {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Reduce a phrase to its compact Pascal-like token: tokenize, capitalize each
/// token, concatenate.
pub fn compact(phrase: &str) -> String {
    tokenize(phrase).iter().map(|t| capitalize(t)).collect()
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Drop runs of `-`, `_` and whitespace, uppercasing the character that follows
/// each run. The first character is left as is.
pub fn camelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn lower_camelize(s: &str) -> String {
    camelize(&decapitalize(s))
}

/// Uppercase the first character; the rest is untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn capitalize_lowered(s: &str) -> String {
    capitalize(&s.to_lowercase())
}

/// Lowercase the first character; the rest is untouched.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// snake_case: `_` before an ASCII uppercase run that follows `[a-z0-9]`,
/// runs of `-`/whitespace become a single `_`, then lowercase.
pub fn underscored(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_sep = false;
    for c in s.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !in_sep {
                out.push('_');
                in_sep = true;
            }
            prev = Some(c);
            continue;
        }
        in_sep = false;
        let starts_upper_run = c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if starts_upper_run {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

/// PascalCase with every non ASCII alphanumeric character treated as a word
/// boundary and removed.
pub fn classify(s: &str) -> String {
    let spaced: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    capitalize(&camelize(&spaced))
}

/// URL slug: diacritics folded to ASCII, anything outside `[A-Za-z0-9_\s-]`
/// becomes `-`, lowercased, dasherized, then `-` trimmed from both ends.
pub fn slugify(s: &str) -> String {
    let folded = fold_diacritics(s);
    let cleaned: String = folded
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
                c
            } else {
                '-'
            }
        })
        .collect();
    dasherize(&cleaned.to_lowercase())
        .trim_matches('-')
        .to_string()
}

/// kebab-case from [`dasherize`], with a single leading `-` removed.
pub fn dasherize_trimmed(s: &str) -> String {
    let d = dasherize(s);
    match d.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => d,
    }
}

/// Title case: lowercase everything, then uppercase the first non-space
/// character of the string and the character after each whitespace or `-`.
pub fn titleize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = true;
    for c in s.to_lowercase().chars() {
        if upper_next {
            if c.is_whitespace() {
                out.push(c);
            } else {
                out.extend(c.to_uppercase());
                upper_next = false;
            }
        } else {
            if c.is_whitespace() || c == '-' {
                upper_next = true;
            }
            out.push(c);
        }
    }
    out
}

/// Words split before every ASCII uppercase letter, joined by single spaces.
pub fn spaced(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    clean(&out)
}

pub fn spaced_lower(s: &str) -> String {
    spaced(s).to_lowercase()
}

pub fn lowercase(s: &str) -> String {
    s.to_lowercase()
}

pub fn uppercase(s: &str) -> String {
    s.to_uppercase()
}

pub fn underscored_upper(s: &str) -> String {
    underscored(s).to_uppercase()
}

pub fn spaced_upper(s: &str) -> String {
    spaced(s).to_uppercase()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `-` before every ASCII uppercase letter, runs of `-`, `_` and whitespace
/// collapsed into one `-`, lowercased. Keeps a leading `-` when the input
/// starts with an uppercase letter.
fn dasherize(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut in_sep = false;
    for c in s.trim().chars() {
        let is_sep = c == '-' || c == '_' || c.is_whitespace();
        if is_sep || c.is_ascii_uppercase() {
            if !in_sep {
                out.push('-');
            }
            if is_sep {
                in_sep = true;
                continue;
            }
        }
        in_sep = false;
        out.push(c);
    }
    out.to_lowercase()
}

/// Trim and collapse inner whitespace runs to a single space.
fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decompose, drop combining marks, and map the few Latin letters that have
/// no decomposition.
fn fold_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.nfd() {
        if unicode_normalization::char::is_combining_mark(c) {
            continue;
        }
        match c {
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'đ' | 'ð' => out.push('d'),
            'Đ' | 'Ð' => out.push('D'),
            _ => out.push(c),
        }
    }
    out
}

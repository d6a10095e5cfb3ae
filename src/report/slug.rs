//! Heading anchor slugs
//!
//! Turns heading display text into URL-fragment ids. The TOC builder and the
//! HTML renderer slug the same text independently, so both must walk the
//! headings in the same order with their own fresh registry.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Anything that is not a letter, digit, whitespace or hyphen
static STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").expect("Invalid STRIP_RE regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RE regex"));

/// Slug `text` without deduplication
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Per-document record of emitted slugs.
///
/// Create one per document; reusing a registry across documents leaks
/// suffixes from one into the other.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    occurrences: HashMap<String, usize>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text`, appending `-1`, `-2`, ... when the slug was already used
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();

        if let Some(&count) = self.occurrences.get(&base) {
            let mut n = count;
            loop {
                slug = format!("{}-{}", base, n);
                if !self.occurrences.contains_key(&slug) {
                    break;
                }
                n += 1;
            }
            self.occurrences.insert(base, n + 1);
        } else {
            self.occurrences.insert(base, 1);
            return slug;
        }

        self.occurrences.insert(slug.clone(), 1);
        slug
    }
}

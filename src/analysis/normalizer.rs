//! Label normalization shared by indexing and querying.
//!
//! Thesaurus labels and query strings must go through the exact same
//! normalization or lookups silently miss. The policy is:
//!
//! 1. Split on Unicode word boundaries (UAX #29), the same boundaries the
//!    [`UnicodeWordTokenizer`] uses for document text.
//! 2. Keep only segments that contain an alphanumeric character.
//! 3. Lowercase each segment (Unicode-aware).
//! 4. Join the segments with a single space.
//!
//! A multi-word label such as `"New-York City"` is therefore stored as
//! `"new york city"`, and the window string built from the tokens
//! `["New", "York", "City"]` normalizes to the same key.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::normalizer::LabelNormalizer;
//!
//! let normalizer = LabelNormalizer::new();
//! assert_eq!(normalizer.normalize("  New-York  City "), "new york city");
//! assert_eq!(normalizer.normalize("new york city"), "new york city");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;

/// Deterministic lowercasing and word-boundary normalization for labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelNormalizer;

impl LabelNormalizer {
    /// Create a new label normalizer.
    pub fn new() -> Self {
        LabelNormalizer
    }

    /// Normalize a label or query string.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = String::with_capacity(text.len());
        for word in self.words(text) {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(&word.to_lowercase());
        }
        normalized
    }

    /// Number of words a label occupies after normalization.
    pub fn word_count(&self, text: &str) -> usize {
        self.words(text).count()
    }

    fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.split_word_bounds()
            .filter(|segment| UnicodeWordTokenizer::is_word(segment))
    }
}

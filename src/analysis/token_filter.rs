//! Token filters.
//!
//! Filters transform the token stream produced by a tokenizer. They may
//! modify tokens or, like the SKOS expansion filters, inject new ones.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`skos_label::SkosLabelFilter`] - Expands labels of thesaurus concepts
//! - [`skos_uri::SkosUriFilter`] - Expands concept identifiers
//!
//! # Examples
//!
//! ```
//! use skos_analysis::analysis::token::Token;
//! use skos_analysis::analysis::token_filter::Filter;
//! use skos_analysis::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so that one filter instance can be
/// shared by analyzers running on several threads.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod skos_label;
pub mod skos_uri;

pub use lowercase::LowercaseFilter;
pub use skos_label::SkosLabelFilter;
pub use skos_uri::SkosUriFilter;

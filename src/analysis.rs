//! Text analysis: tokens, tokenizers, filters and analyzers.
//!
//! The SKOS expansion filters plug into this pipeline like any other filter,
//! so a host can combine them with its own tokenizers.

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

//! Thesaurus label expansion filter.
//!
//! Runs a [`LabelExpander`] over the token stream: windows of up to
//! `window_size` tokens are matched against concept labels, longest first,
//! and each match injects the configured expansions next to its trigger.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use skos_analysis::analysis::token::Token;
//! use skos_analysis::analysis::token_filter::Filter;
//! use skos_analysis::analysis::token_filter::skos_label::SkosLabelFilter;
//! use skos_analysis::skos::concept::{ExpansionKind, LabelKind};
//! use skos_analysis::skos::graph::RelationGraph;
//! use skos_analysis::skos::store::{ConceptStore, StoreConfig};
//!
//! let mut graph = RelationGraph::new();
//! graph
//!     .add_label("ex:ml", LabelKind::Pref, "machine learning", None)
//!     .add_label("ex:ml", LabelKind::Alt, "ml", None);
//! let store = Arc::new(ConceptStore::build(&graph, StoreConfig::default()).unwrap());
//!
//! let filter = SkosLabelFilter::new(store, vec![ExpansionKind::AltLabel]).with_window_size(2);
//! let tokens = vec![Token::new("machine", 0), Token::new("learning", 1)];
//! let texts: Vec<String> = filter
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(texts, vec!["machine", "ml", "learning"]);
//! ```

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::skos::concept::{ExpansionKind, LabelKind};
use crate::skos::config::ExpansionConfig;
use crate::skos::expander::LabelExpander;
use crate::skos::source::ConceptSource;

/// Expands tokens and token windows that match concept labels.
#[derive(Clone)]
pub struct SkosLabelFilter {
    source: Arc<dyn ConceptSource>,
    kinds: Vec<ExpansionKind>,
    match_kinds: Vec<LabelKind>,
    window_size: usize,
}

impl SkosLabelFilter {
    pub fn new(source: Arc<dyn ConceptSource>, kinds: Vec<ExpansionKind>) -> Self {
        SkosLabelFilter {
            source,
            kinds,
            match_kinds: LabelKind::ALL.to_vec(),
            window_size: 1,
        }
    }

    /// Build from an expansion configuration; the configuration is validated first.
    pub fn from_config(source: Arc<dyn ConceptSource>, config: &ExpansionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(source, config.expansion_kinds.clone())
            .with_window_size(config.window_size)
            .with_match_kinds(config.match_label_kinds.clone()))
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    pub fn with_match_kinds(mut self, match_kinds: Vec<LabelKind>) -> Self {
        self.match_kinds = match_kinds;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn kinds(&self) -> &[ExpansionKind] {
        &self.kinds
    }

    /// A lazily evaluated expander over `tokens`.
    pub fn expander<I: Iterator<Item = Token>>(&self, tokens: I) -> LabelExpander<I> {
        LabelExpander::new(tokens, Arc::clone(&self.source), self.kinds.clone())
            .with_window_size(self.window_size)
            .with_match_kinds(self.match_kinds.clone())
    }
}

impl Filter for SkosLabelFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let expanded = self.expander(tokens).collect::<Result<Vec<_>>>()?;
        Ok(Box::new(expanded.into_iter()))
    }

    fn name(&self) -> &'static str {
        "skos_label"
    }
}

impl std::fmt::Debug for SkosLabelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkosLabelFilter")
            .field("kinds", &self.kinds)
            .field("match_kinds", &self.match_kinds)
            .field("window_size", &self.window_size)
            .finish()
    }
}

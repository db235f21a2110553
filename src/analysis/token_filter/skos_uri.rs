//! Concept identifier expansion filter.

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::skos::concept::ExpansionKind;
use crate::skos::config::ExpansionConfig;
use crate::skos::expander::UriExpander;
use crate::skos::source::ConceptSource;

/// Expands tokens that are concept URIs. Other tokens pass through.
#[derive(Clone)]
pub struct SkosUriFilter {
    source: Arc<dyn ConceptSource>,
    kinds: Vec<ExpansionKind>,
}

impl SkosUriFilter {
    pub fn new(source: Arc<dyn ConceptSource>, kinds: Vec<ExpansionKind>) -> Self {
        SkosUriFilter { source, kinds }
    }

    pub fn from_config(source: Arc<dyn ConceptSource>, config: &ExpansionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(source, config.expansion_kinds.clone()))
    }
}

impl Filter for SkosUriFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let expander = UriExpander::new(tokens, Arc::clone(&self.source), self.kinds.clone());
        let expanded = expander.collect::<Result<Vec<_>>>()?;
        Ok(Box::new(expanded.into_iter()))
    }

    fn name(&self) -> &'static str {
        "skos_uri"
    }
}

impl std::fmt::Debug for SkosUriFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkosUriFilter")
            .field("kinds", &self.kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, Token};
    use crate::skos::concept::{LabelKind, RelationKind};
    use crate::skos::graph::RelationGraph;
    use crate::skos::store::{ConceptStore, StoreConfig};

    #[test]
    fn test_uri_filter() {
        let mut graph = RelationGraph::new();
        graph
            .add_label("ex:1", LabelKind::Pref, "leaps", None)
            .add_label("ex:0", LabelKind::Pref, "movement", None)
            .add_relation("ex:1", RelationKind::Broader, "ex:0");
        let store = Arc::new(ConceptStore::build(&graph, StoreConfig::default()).unwrap());

        let filter = SkosUriFilter::new(
            store,
            vec![ExpansionKind::PrefLabel, ExpansionKind::Broader],
        );
        let texts: Vec<String> = filter
            .filter(vec![Token::new("ex:1", 0)].into_token_stream())
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["ex:1", "leaps", "movement"]);
        assert_eq!(filter.name(), "skos_uri");
    }
}

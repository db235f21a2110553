//! Thesaurus-expanding analyzer.
//!
//! In label mode the text is split on Unicode word boundaries (the same
//! policy the store normalizes labels with), lowercased and run through a
//! [`SkosLabelFilter`]. In URI mode the whole value is one concept
//! identifier handed to a [`SkosUriFilter`].

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::skos_label::SkosLabelFilter;
use crate::analysis::token_filter::skos_uri::SkosUriFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::Result;
use crate::skos::config::{ExpansionConfig, ExpansionMode};
use crate::skos::source::ConceptSource;

/// Analyzer that expands thesaurus terms according to an [`ExpansionConfig`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use skos_analysis::analysis::analyzer::Analyzer;
/// use skos_analysis::analysis::analyzer::skos::SkosAnalyzer;
/// use skos_analysis::skos::concept::{ExpansionKind, LabelKind};
/// use skos_analysis::skos::config::{ExpansionConfig, ExpansionMode};
/// use skos_analysis::skos::graph::RelationGraph;
/// use skos_analysis::skos::store::ConceptStore;
///
/// let mut graph = RelationGraph::new();
/// graph.add_label("ex:1", LabelKind::Pref, "leaps", None);
///
/// let config = ExpansionConfig::new(ExpansionMode::Uri, vec![ExpansionKind::PrefLabel]);
/// let store = Arc::new(ConceptStore::build(&graph, config.store_config()).unwrap());
/// let analyzer = SkosAnalyzer::from_config(store, &config).unwrap();
///
/// let texts: Vec<String> = analyzer.analyze("ex:1").unwrap().map(|t| t.text).collect();
/// assert_eq!(texts, vec!["ex:1", "leaps"]);
/// ```
#[derive(Clone, Debug)]
pub struct SkosAnalyzer {
    inner: PipelineAnalyzer,
    mode: ExpansionMode,
}

impl SkosAnalyzer {
    /// Build the analysis chain for `config` over a shared concept source.
    pub fn from_config(source: Arc<dyn ConceptSource>, config: &ExpansionConfig) -> Result<Self> {
        let inner = match config.mode {
            ExpansionMode::Label => PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
                .add_filter(Arc::new(LowercaseFilter::new()))
                .add_filter(Arc::new(SkosLabelFilter::from_config(source, config)?))
                .with_name("skos_label"),
            ExpansionMode::Uri => PipelineAnalyzer::new(Arc::new(WholeTokenizer::new()))
                .add_filter(Arc::new(SkosUriFilter::from_config(source, config)?))
                .with_name("skos_uri"),
        };

        Ok(SkosAnalyzer {
            inner,
            mode: config.mode,
        })
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for SkosAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "skos"
    }
}

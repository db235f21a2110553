//! # skos-analysis
//!
//! SKOS thesaurus-aware term expansion for text analysis pipelines.
//!
//! ## Features
//!
//! - Loading vocabularies from N-Triples, Turtle, N3 and RDF/XML
//! - An immutable, shareable concept store with an FST label index
//! - Greedy multi-word label matching with co-positioned expansion tokens
//! - Concept URI expansion for identifier fields
//! - Token filters and analyzers that plug into an analysis pipeline

pub mod analysis;
pub mod cli;
pub mod error;
pub mod skos;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer, SkosAnalyzer};
    pub use crate::analysis::normalizer::LabelNormalizer;
    pub use crate::analysis::token::{Token, TokenStream, TokenType};
    pub use crate::analysis::token_filter::{Filter, SkosLabelFilter, SkosUriFilter};
    pub use crate::analysis::tokenizer::Tokenizer;
    pub use crate::error::{Result, SkosError};
    pub use crate::skos::{
        ConceptSource, ConceptStore, ExpansionConfig, ExpansionKind, ExpansionMode, GraphLoader,
        LabelKind, RdfFormat, RdfGraphLoader, RelationGraph, RelationKind, StoreConfig,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! SKOS vocabularies: loading, indexing and token stream expansion.
//!
//! A vocabulary flows through three stages:
//!
//! ```text
//! GraphLoader → RelationGraph → ConceptStore → LabelExpander / UriExpander
//! ```
//!
//! The store is built once and shared read-only (through `Arc`) by any
//! number of expanders, each owning its own buffer and queue.

pub mod concept;
pub mod config;
pub mod expander;
pub mod graph;
pub mod loader;
pub mod source;
pub mod store;

pub use concept::{Concept, ExpansionKind, LabelKind, RelationKind};
pub use config::{ExpansionConfig, ExpansionMode};
pub use expander::{ExpansionState, LabelExpander, UriExpander};
pub use graph::RelationGraph;
pub use loader::{GraphLoader, RdfFormat, RdfGraphLoader};
pub use source::ConceptSource;
pub use store::{ConceptStore, StoreConfig};

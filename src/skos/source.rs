//! Concept access as seen by the expansion filters.
//!
//! The filters only ever talk to a [`ConceptSource`]. The in-memory
//! [`ConceptStore`] never fails, but other backends may, and their failures
//! have to reach the caller of the token stream.

use crate::error::Result;
use crate::skos::concept::{ExpansionKind, ExpansionTarget, LabelKind};
use crate::skos::store::ConceptStore;

/// Read-only concept lookups used while expanding a token stream.
pub trait ConceptSource: Send + Sync {
    /// URIs of the concepts labelled `text` with one of `kinds`.
    fn concepts_for_label(&self, text: &str, kinds: &[LabelKind]) -> Result<Vec<String>>;

    /// Whether `uri` identifies a concept.
    fn contains_concept(&self, uri: &str) -> Result<bool>;

    /// Expansion texts of `kind` for the concept `uri`, in store order.
    ///
    /// Unknown concepts and absent relations yield an empty list.
    fn expansions(&self, uri: &str, kind: ExpansionKind) -> Result<Vec<String>>;
}

impl ConceptSource for ConceptStore {
    fn concepts_for_label(&self, text: &str, kinds: &[LabelKind]) -> Result<Vec<String>> {
        Ok(self
            .lookup_by_label(text, kinds)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn contains_concept(&self, uri: &str) -> Result<bool> {
        Ok(self.contains(uri))
    }

    fn expansions(&self, uri: &str, kind: ExpansionKind) -> Result<Vec<String>> {
        let texts = match kind.target() {
            ExpansionTarget::Labels(label) => self.labels(uri, label).to_vec(),
            ExpansionTarget::Relation(relation) => self
                .relation_labels(uri, relation)
                .into_iter()
                .map(str::to_string)
                .collect(),
            ExpansionTarget::Identifier if self.contains(uri) => vec![uri.to_string()],
            ExpansionTarget::Identifier => Vec::new(),
        };
        Ok(texts)
    }
}

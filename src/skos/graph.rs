//! In-memory relation graph produced by a [`GraphLoader`](super::loader::GraphLoader).
//!
//! Only SKOS label and semantic relation statements survive loading; all other
//! predicates are dropped by the loader. Statements keep source order so the
//! store can reproduce label and relation order deterministically.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::skos::concept::{LabelKind, RelationKind};

/// SKOS core namespace.
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// A graph node that can be the subject of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Iri(String),
    Blank(String),
}

impl Resource {
    pub fn iri<S: Into<String>>(iri: S) -> Self {
        Resource::Iri(iri.into())
    }

    /// Identifier under which the resource is indexed.
    ///
    /// Blank nodes are keyed in N-Triples notation (`_:id`).
    pub fn key(&self) -> String {
        match self {
            Resource::Iri(iri) => iri.clone(),
            Resource::Blank(id) => format!("_:{id}"),
        }
    }
}

/// A language-tagged or plain literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub language: Option<String>,
}

/// Object position of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Object {
    Resource(Resource),
    Literal(Literal),
}

/// The SKOS properties the store understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Label(LabelKind),
    Relation(RelationKind),
}

impl Predicate {
    /// Map a property IRI onto a SKOS predicate, if it is one we index.
    pub fn from_iri(iri: &str) -> Option<Self> {
        let local = iri.strip_prefix(SKOS_NS)?;
        let predicate = match local {
            "prefLabel" => Predicate::Label(LabelKind::Pref),
            "altLabel" => Predicate::Label(LabelKind::Alt),
            "hiddenLabel" => Predicate::Label(LabelKind::Hidden),
            "broader" => Predicate::Relation(RelationKind::Broader),
            "broaderTransitive" => Predicate::Relation(RelationKind::BroaderTransitive),
            "narrower" => Predicate::Relation(RelationKind::Narrower),
            "narrowerTransitive" => Predicate::Relation(RelationKind::NarrowerTransitive),
            "related" => Predicate::Relation(RelationKind::Related),
            _ => return None,
        };
        Some(predicate)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Resource,
    pub predicate: Predicate,
    pub object: Object,
}

/// Ordered collection of SKOS statements.
///
/// # Examples
///
/// ```
/// use skos_analysis::skos::concept::{LabelKind, RelationKind};
/// use skos_analysis::skos::graph::RelationGraph;
///
/// let mut graph = RelationGraph::new();
/// graph.add_label("ex:1", LabelKind::Pref, "leaps", Some("en"));
/// graph.add_relation("ex:1", RelationKind::Broader, "ex:0");
///
/// // ex:0 carries no label, so only ex:1 is a concept.
/// assert_eq!(graph.entail(), vec!["ex:1".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationGraph {
    statements: Vec<Statement>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add a label statement with an optional language tag.
    pub fn add_label(
        &mut self,
        subject: &str,
        kind: LabelKind,
        value: &str,
        language: Option<&str>,
    ) -> &mut Self {
        self.push(Statement {
            subject: Resource::iri(subject),
            predicate: Predicate::Label(kind),
            object: Object::Literal(Literal {
                value: value.to_string(),
                language: language.map(str::to_string),
            }),
        });
        self
    }

    /// Add a relation statement between two IRIs.
    pub fn add_relation(&mut self, subject: &str, kind: RelationKind, object: &str) -> &mut Self {
        self.push(Statement {
            subject: Resource::iri(subject),
            predicate: Predicate::Relation(kind),
            object: Object::Resource(Resource::iri(object)),
        });
        self
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Apply the concept entailment rule.
    ///
    /// Every subject of a well-formed label statement is a concept; nothing
    /// else is. The rule does not chain, so one pass reaches the fixed point.
    /// Concept keys are returned in order of first appearance.
    pub fn entail(&self) -> Vec<String> {
        let mut seen = AHashSet::new();
        let mut concepts = Vec::new();

        for statement in &self.statements {
            let is_label = matches!(
                (&statement.predicate, &statement.object),
                (Predicate::Label(_), Object::Literal(_))
            );
            if is_label {
                let key = statement.subject.key();
                if seen.insert(key.clone()) {
                    concepts.push(key);
                }
            }
        }

        concepts
    }
}

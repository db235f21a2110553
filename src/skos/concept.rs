//! Concept records and the closed sets of label, relation and expansion kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};

/// The three lexical label kinds of a concept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKind {
    /// `skos:prefLabel`
    Pref,
    /// `skos:altLabel`
    Alt,
    /// `skos:hiddenLabel`
    Hidden,
}

impl LabelKind {
    /// All label kinds, in display priority order.
    pub const ALL: [LabelKind; 3] = [LabelKind::Pref, LabelKind::Alt, LabelKind::Hidden];

    /// Dense index used for per-kind tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelKind::Pref => "pref",
            LabelKind::Alt => "alt",
            LabelKind::Hidden => "hidden",
        }
    }
}

impl FromStr for LabelKind {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pref" | "preflabel" => Ok(LabelKind::Pref),
            "alt" | "altlabel" => Ok(LabelKind::Alt),
            "hidden" | "hiddenlabel" => Ok(LabelKind::Hidden),
            other => Err(SkosError::invalid_config(format!(
                "unknown label kind '{other}'"
            ))),
        }
    }
}

/// Concept-to-concept relations kept by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    Broader,
    BroaderTransitive,
    Narrower,
    NarrowerTransitive,
    Related,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Broader,
        RelationKind::BroaderTransitive,
        RelationKind::Narrower,
        RelationKind::NarrowerTransitive,
        RelationKind::Related,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Broader => "broader",
            RelationKind::BroaderTransitive => "broaderTransitive",
            RelationKind::Narrower => "narrower",
            RelationKind::NarrowerTransitive => "narrowerTransitive",
            RelationKind::Related => "related",
        }
    }
}

/// What an expansion filter is allowed to emit for a matched concept.
///
/// Label kinds emit the concept's own labels; relation kinds emit the
/// preferred and alternative labels of the related concepts; `Uri` emits the
/// concept identifier itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpansionKind {
    #[serde(rename = "prefLabel", alias = "pref")]
    PrefLabel,
    #[serde(rename = "altLabel", alias = "alt")]
    AltLabel,
    #[serde(rename = "hiddenLabel", alias = "hidden")]
    HiddenLabel,
    #[serde(rename = "broader")]
    Broader,
    #[serde(rename = "broaderTransitive")]
    BroaderTransitive,
    #[serde(rename = "narrower")]
    Narrower,
    #[serde(rename = "narrowerTransitive")]
    NarrowerTransitive,
    #[serde(rename = "related")]
    Related,
    #[serde(rename = "uri")]
    Uri,
}

/// Where the tokens of an expansion kind come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpansionTarget {
    /// The matched concept's own labels of this kind.
    Labels(LabelKind),
    /// Preferred and alternative labels of the concepts reached by this relation.
    Relation(RelationKind),
    /// The matched concept's identifier.
    Identifier,
}

impl ExpansionKind {
    pub const ALL: [ExpansionKind; 9] = [
        ExpansionKind::PrefLabel,
        ExpansionKind::AltLabel,
        ExpansionKind::HiddenLabel,
        ExpansionKind::Broader,
        ExpansionKind::BroaderTransitive,
        ExpansionKind::Narrower,
        ExpansionKind::NarrowerTransitive,
        ExpansionKind::Related,
        ExpansionKind::Uri,
    ];

    /// Dispatch table from expansion kind to the store accessor it uses.
    pub fn target(self) -> ExpansionTarget {
        match self {
            ExpansionKind::PrefLabel => ExpansionTarget::Labels(LabelKind::Pref),
            ExpansionKind::AltLabel => ExpansionTarget::Labels(LabelKind::Alt),
            ExpansionKind::HiddenLabel => ExpansionTarget::Labels(LabelKind::Hidden),
            ExpansionKind::Broader => ExpansionTarget::Relation(RelationKind::Broader),
            ExpansionKind::BroaderTransitive => {
                ExpansionTarget::Relation(RelationKind::BroaderTransitive)
            }
            ExpansionKind::Narrower => ExpansionTarget::Relation(RelationKind::Narrower),
            ExpansionKind::NarrowerTransitive => {
                ExpansionTarget::Relation(RelationKind::NarrowerTransitive)
            }
            ExpansionKind::Related => ExpansionTarget::Relation(RelationKind::Related),
            ExpansionKind::Uri => ExpansionTarget::Identifier,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpansionKind::PrefLabel => "prefLabel",
            ExpansionKind::AltLabel => "altLabel",
            ExpansionKind::HiddenLabel => "hiddenLabel",
            ExpansionKind::Broader => "broader",
            ExpansionKind::BroaderTransitive => "broaderTransitive",
            ExpansionKind::Narrower => "narrower",
            ExpansionKind::NarrowerTransitive => "narrowerTransitive",
            ExpansionKind::Related => "related",
            ExpansionKind::Uri => "uri",
        }
    }
}

impl fmt::Display for ExpansionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpansionKind {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ExpansionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_ascii_lowercase().as_str() {
                "pref" => Some(ExpansionKind::PrefLabel),
                "alt" => Some(ExpansionKind::AltLabel),
                "hidden" => Some(ExpansionKind::HiddenLabel),
                _ => None,
            })
            .ok_or_else(|| SkosError::invalid_config(format!("unknown expansion kind '{s}'")))
    }
}

/// A fully indexed concept.
///
/// Labels are stored normalized; relation lists hold concept URIs only and
/// are resolved to labels through the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uri: String,
    pub pref_labels: Vec<String>,
    pub alt_labels: Vec<String>,
    pub hidden_labels: Vec<String>,
    pub broader: Vec<String>,
    pub broader_transitive: Vec<String>,
    pub narrower: Vec<String>,
    pub narrower_transitive: Vec<String>,
    pub related: Vec<String>,
}

impl Concept {
    pub fn new<S: Into<String>>(uri: S) -> Self {
        Concept {
            uri: uri.into(),
            ..Default::default()
        }
    }

    /// Labels of the given kind.
    pub fn labels(&self, kind: LabelKind) -> &[String] {
        match kind {
            LabelKind::Pref => &self.pref_labels,
            LabelKind::Alt => &self.alt_labels,
            LabelKind::Hidden => &self.hidden_labels,
        }
    }

    pub(crate) fn labels_mut(&mut self, kind: LabelKind) -> &mut Vec<String> {
        match kind {
            LabelKind::Pref => &mut self.pref_labels,
            LabelKind::Alt => &mut self.alt_labels,
            LabelKind::Hidden => &mut self.hidden_labels,
        }
    }

    /// Concept URIs reached through the given relation.
    pub fn related(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Broader => &self.broader,
            RelationKind::BroaderTransitive => &self.broader_transitive,
            RelationKind::Narrower => &self.narrower,
            RelationKind::NarrowerTransitive => &self.narrower_transitive,
            RelationKind::Related => &self.related,
        }
    }

    pub(crate) fn related_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Broader => &mut self.broader,
            RelationKind::BroaderTransitive => &mut self.broader_transitive,
            RelationKind::Narrower => &mut self.narrower,
            RelationKind::NarrowerTransitive => &mut self.narrower_transitive,
            RelationKind::Related => &mut self.related,
        }
    }

    /// Every label of the concept regardless of kind.
    pub fn all_labels(&self) -> impl Iterator<Item = (LabelKind, &str)> {
        LabelKind::ALL.into_iter().flat_map(move |kind| {
            self.labels(kind)
                .iter()
                .map(move |label| (kind, label.as_str()))
        })
    }
}

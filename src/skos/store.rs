//! The concept store.
//!
//! A [`ConceptStore`] is built once from a vocabulary and is immutable
//! afterwards. It answers two kinds of questions:
//!
//! - label → concepts, through an FST keyed by normalized label text whose
//!   postings keep concept ids per label kind;
//! - concept → labels / relations, through the concept records.
//!
//! Transitive broader/narrower closures are materialized at build time.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::skos::concept::{LabelKind, RelationKind};
//! use skos_analysis::skos::graph::RelationGraph;
//! use skos_analysis::skos::store::{ConceptStore, StoreConfig};
//!
//! let mut graph = RelationGraph::new();
//! graph
//!     .add_label("ex:1", LabelKind::Pref, "leaps", None)
//!     .add_label("ex:2", LabelKind::Pref, "jumps", None)
//!     .add_label("ex:2", LabelKind::Alt, "leaps", None);
//!
//! let store = ConceptStore::build(&graph, StoreConfig::default()).unwrap();
//! let mut hits = store.lookup_by_label("Leaps", &[LabelKind::Pref, LabelKind::Alt]);
//! hits.sort();
//! assert_eq!(hits, vec!["ex:1", "ex:2"]);
//! assert!(store.related("ex:404", RelationKind::Broader).is_empty());
//! ```

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use fst::{Map, MapBuilder};
use log::{debug, info, warn};

use crate::analysis::normalizer::LabelNormalizer;
use crate::error::{Result, SkosError};
use crate::skos::concept::{Concept, LabelKind, RelationKind};
use crate::skos::graph::{Object, Predicate, RelationGraph};
use crate::skos::loader::GraphLoader;

/// Build-time options of a store. Fixed for the lifetime of the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Language tags whose labels are retained; `None` keeps all languages.
    ///
    /// Untagged labels are only retained when the empty tag `""` is listed.
    pub languages: Option<HashSet<String>>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict retained labels to the given language tags.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a label with the given language tag is retained.
    pub fn accepts(&self, language: Option<&str>) -> bool {
        match &self.languages {
            None => true,
            Some(languages) => languages.contains(language.unwrap_or("")),
        }
    }
}

/// Concept ids per label kind for one normalized label.
type Posting = [Vec<u32>; 3];

/// Immutable, thread-safe index over a SKOS vocabulary.
#[derive(Debug)]
pub struct ConceptStore {
    concepts: Vec<Concept>,
    ids: AHashMap<String, u32>,
    labels: Map<Vec<u8>>,
    postings: Vec<Posting>,
    max_label_tokens: usize,
    config: StoreConfig,
    normalizer: LabelNormalizer,
}

impl ConceptStore {
    /// Load, entail and index a vocabulary.
    ///
    /// The build is atomic: any failure returns an error and no store.
    pub fn build(loader: &dyn GraphLoader, config: StoreConfig) -> Result<Self> {
        let started = Instant::now();
        let graph = loader.load()?;
        let store = Self::from_graph(&graph, config)?;

        info!(
            "built concept store from {}: {} concepts, {} distinct labels in {:?}",
            loader.describe(),
            store.len(),
            store.label_count(),
            started.elapsed()
        );

        Ok(store)
    }

    /// Index an already loaded relation graph.
    pub fn from_graph(graph: &RelationGraph, config: StoreConfig) -> Result<Self> {
        let normalizer = LabelNormalizer::new();
        let uris = graph.entail();

        let mut ids = AHashMap::with_capacity(uris.len());
        let mut concepts = Vec::with_capacity(uris.len());
        for uri in uris {
            let id = u32::try_from(concepts.len())
                .map_err(|_| SkosError::store("too many concepts for one store"))?;
            ids.insert(uri.clone(), id);
            concepts.push(Concept::new(uri));
        }

        for statement in graph.statements() {
            let subject = statement.subject.key();
            let Some(&id) = ids.get(&subject) else {
                debug!("ignoring statement about non-concept {subject}");
                continue;
            };
            let concept = &mut concepts[id as usize];

            match (&statement.predicate, &statement.object) {
                (Predicate::Label(kind), Object::Literal(literal)) => {
                    if !config.accepts(literal.language.as_deref()) {
                        continue;
                    }
                    let label = normalizer.normalize(&literal.value);
                    if label.is_empty() {
                        debug!("ignoring empty {} label of {subject}", kind.as_str());
                        continue;
                    }
                    push_unique(concept.labels_mut(*kind), label);
                }
                (Predicate::Relation(kind), Object::Resource(target)) => {
                    push_unique(concept.related_mut(*kind), target.key());
                }
                (Predicate::Label(kind), Object::Resource(target)) => {
                    warn!(
                        "skipping {} label of {subject}: object {} is not a literal",
                        kind.as_str(),
                        target.key()
                    );
                }
                (Predicate::Relation(kind), Object::Literal(literal)) => {
                    warn!(
                        "skipping {} relation of {subject}: object \"{}\" is not a resource",
                        kind.as_str(),
                        literal.value
                    );
                }
            }
        }

        let broader = transitive_closure(
            &concepts,
            &ids,
            RelationKind::Broader,
            RelationKind::BroaderTransitive,
        );
        let narrower = transitive_closure(
            &concepts,
            &ids,
            RelationKind::Narrower,
            RelationKind::NarrowerTransitive,
        );
        for ((concept, broader), narrower) in concepts.iter_mut().zip(broader).zip(narrower) {
            concept.broader_transitive = broader;
            concept.narrower_transitive = narrower;
        }

        let (labels, postings, max_label_tokens) = build_label_index(&concepts, &normalizer)?;

        Ok(ConceptStore {
            concepts,
            ids,
            labels,
            postings,
            max_label_tokens,
            config,
            normalizer,
        })
    }

    /// Build a store with every query returning empty results.
    pub fn empty() -> Result<Self> {
        Self::from_graph(&RelationGraph::new(), StoreConfig::default())
    }

    /// Look up a concept by URI.
    pub fn concept(&self, uri: &str) -> Option<&Concept> {
        self.ids.get(uri).map(|&id| &self.concepts[id as usize])
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.ids.contains_key(uri)
    }

    /// URIs of the concepts carrying `text` as a label of one of `kinds`.
    ///
    /// `text` is normalized first. Results are unique and ordered by the
    /// position of the concept in the source vocabulary.
    pub fn lookup_by_label(&self, text: &str, kinds: &[LabelKind]) -> Vec<&str> {
        let key = self.normalizer.normalize(text);
        if key.is_empty() {
            return Vec::new();
        }
        let Some(index) = self.labels.get(key.as_bytes()) else {
            return Vec::new();
        };
        let posting = &self.postings[index as usize];

        let mut ids: Vec<u32> = kinds
            .iter()
            .flat_map(|kind| posting[kind.index()].iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .map(|id| self.concepts[id as usize].uri.as_str())
            .collect()
    }

    /// Concept URIs reached from `uri` through `relation`; empty for unknown concepts.
    pub fn related(&self, uri: &str, relation: RelationKind) -> &[String] {
        self.concept(uri)
            .map(|concept| concept.related(relation))
            .unwrap_or(&[])
    }

    /// Labels of `kind` of the concept; empty for unknown concepts.
    pub fn labels(&self, uri: &str, kind: LabelKind) -> &[String] {
        self.concept(uri)
            .map(|concept| concept.labels(kind))
            .unwrap_or(&[])
    }

    /// Preferred then alternative labels of every concept reached through `relation`.
    pub fn relation_labels(&self, uri: &str, relation: RelationKind) -> Vec<&str> {
        self.related(uri, relation)
            .iter()
            .filter_map(|target| self.concept(target))
            .flat_map(|target| {
                target
                    .pref_labels
                    .iter()
                    .chain(target.alt_labels.iter())
                    .map(String::as_str)
            })
            .collect()
    }

    /// All concepts in source order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Number of distinct normalized labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Word count of the longest label; the smallest window size that can
    /// match every label.
    pub fn max_label_tokens(&self) -> usize {
        self.max_label_tokens
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &LabelNormalizer {
        &self.normalizer
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Breadth-first reachability over `direct` edges plus explicitly stated
/// `explicit` edges, per concept. A concept never appears in its own closure
/// and every node is visited at most once, so cycles terminate.
fn transitive_closure(
    concepts: &[Concept],
    ids: &AHashMap<String, u32>,
    direct: RelationKind,
    explicit: RelationKind,
) -> Vec<Vec<String>> {
    let successors = |concept: &Concept| -> Vec<String> {
        concept
            .related(direct)
            .iter()
            .chain(concept.related(explicit))
            .cloned()
            .collect()
    };

    concepts
        .iter()
        .map(|concept| {
            let mut visited: AHashSet<String> = AHashSet::new();
            visited.insert(concept.uri.clone());

            let mut queue: VecDeque<String> = successors(concept).into();
            let mut closure = Vec::new();

            while let Some(uri) = queue.pop_front() {
                if !visited.insert(uri.clone()) {
                    continue;
                }
                if let Some(&next) = ids.get(&uri) {
                    queue.extend(
                        successors(&concepts[next as usize])
                            .into_iter()
                            .filter(|candidate| !visited.contains(candidate)),
                    );
                }
                closure.push(uri);
            }

            closure
        })
        .collect()
}

fn build_label_index(
    concepts: &[Concept],
    normalizer: &LabelNormalizer,
) -> Result<(Map<Vec<u8>>, Vec<Posting>, usize)> {
    let mut by_label: BTreeMap<&str, Posting> = BTreeMap::new();
    let mut max_label_tokens = 0;

    for (id, concept) in concepts.iter().enumerate() {
        for (kind, label) in concept.all_labels() {
            by_label.entry(label).or_default()[kind.index()].push(id as u32);
            max_label_tokens = max_label_tokens.max(normalizer.word_count(label));
        }
    }

    // Keys come out of the BTreeMap in lexicographic byte order, as the FST requires.
    let mut builder = MapBuilder::memory();
    let mut postings = Vec::with_capacity(by_label.len());
    for (label, posting) in by_label {
        builder
            .insert(label.as_bytes(), postings.len() as u64)
            .map_err(|e| SkosError::store(format!("FST build error: {e}")))?;
        postings.push(posting);
    }

    let bytes = builder
        .into_inner()
        .map_err(|e| SkosError::store(format!("FST finalize error: {e}")))?;
    let labels =
        Map::new(bytes).map_err(|e| SkosError::store(format!("FST creation error: {e}")))?;

    Ok((labels, postings, max_label_tokens))
}

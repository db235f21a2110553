//! Vocabulary loading.
//!
//! A [`GraphLoader`] turns a serialized vocabulary into a [`RelationGraph`].
//! [`RdfGraphLoader`] reads the textual RDF serializations (N-Triples, Turtle,
//! N3 and RDF/XML) through `oxrdfio`; an already built [`RelationGraph`] is a
//! loader of itself.
//!
//! # Examples
//!
//! ```
//! use skos_analysis::skos::loader::{GraphLoader, RdfFormat, RdfGraphLoader};
//!
//! let data = r#"
//! @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
//! <http://example.com/concept/1> skos:prefLabel "leaps"@en .
//! "#;
//!
//! let loader = RdfGraphLoader::from_bytes(data.as_bytes().to_vec(), RdfFormat::Turtle);
//! let graph = loader.load().unwrap();
//! assert_eq!(graph.len(), 1);
//! ```

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use oxrdf::{Subject, Term};
use oxrdfio::{RdfFormat as OxRdfFormat, RdfParser};

use crate::error::{Result, SkosError};
use crate::skos::graph::{Literal, Object, Predicate, RelationGraph, Resource, Statement};

/// Source of a vocabulary relation graph.
pub trait GraphLoader {
    /// Load the relation graph.
    fn load(&self) -> Result<RelationGraph>;

    /// Human-readable description of the source, used in log and error messages.
    fn describe(&self) -> String {
        "in-memory graph".to_string()
    }
}

impl GraphLoader for RelationGraph {
    fn load(&self) -> Result<RelationGraph> {
        Ok(self.clone())
    }
}

/// Supported RDF serializations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    N3,
    RdfXml,
}

impl RdfFormat {
    /// Guess the serialization from a file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "nt" => Ok(RdfFormat::NTriples),
            "ttl" => Ok(RdfFormat::Turtle),
            "n3" => Ok(RdfFormat::N3),
            "rdf" | "xml" | "owl" => Ok(RdfFormat::RdfXml),
            _ => Err(SkosError::format(format!(
                "cannot determine RDF serialization of '{}'",
                path.display()
            ))),
        }
    }

    fn to_oxrdfio(self) -> OxRdfFormat {
        match self {
            RdfFormat::NTriples => OxRdfFormat::NTriples,
            RdfFormat::Turtle => OxRdfFormat::Turtle,
            RdfFormat::N3 => OxRdfFormat::N3,
            RdfFormat::RdfXml => OxRdfFormat::RdfXml,
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::NTriples => "N-TRIPLES",
            RdfFormat::Turtle => "TURTLE",
            RdfFormat::N3 => "N3",
            RdfFormat::RdfXml => "RDF/XML",
        };
        f.write_str(name)
    }
}

impl FromStr for RdfFormat {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N-TRIPLES" | "NTRIPLES" | "NT" => Ok(RdfFormat::NTriples),
            "TURTLE" | "TTL" => Ok(RdfFormat::Turtle),
            "N3" => Ok(RdfFormat::N3),
            "RDF/XML" | "RDFXML" | "XML" => Ok(RdfFormat::RdfXml),
            _ => Err(SkosError::format(format!(
                "invalid RDF serialization format '{s}' (expected N-TRIPLES, TURTLE, N3 or RDF/XML)"
            ))),
        }
    }
}

enum Source {
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Loads a SKOS vocabulary from a textual RDF serialization.
pub struct RdfGraphLoader {
    source: Source,
    format: RdfFormat,
}

impl RdfGraphLoader {
    /// Load from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>, format: RdfFormat) -> Self {
        RdfGraphLoader {
            source: Source::Bytes(bytes),
            format,
        }
    }

    /// Drain a reader into memory and load from it.
    pub fn from_reader<R: Read>(mut reader: R, format: RdfFormat) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes, format))
    }

    /// Load from a file. The file is read when [`GraphLoader::load`] runs.
    pub fn from_path<P: Into<PathBuf>>(path: P, format: RdfFormat) -> Self {
        RdfGraphLoader {
            source: Source::File(path.into()),
            format,
        }
    }

    /// Load from a file, guessing the serialization from its extension.
    pub fn from_path_guess<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let format = RdfFormat::from_path(&path)?;
        Ok(Self::from_path(path, format))
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }

    fn read_source(&self) -> Result<std::borrow::Cow<'_, [u8]>> {
        match &self.source {
            Source::Bytes(bytes) => Ok(std::borrow::Cow::Borrowed(bytes.as_slice())),
            Source::File(path) => std::fs::read(path)
                .map(std::borrow::Cow::Owned)
                .map_err(|e| {
                    SkosError::Io(std::io::Error::new(
                        e.kind(),
                        format!("cannot read vocabulary '{}': {e}", path.display()),
                    ))
                }),
        }
    }
}

impl GraphLoader for RdfGraphLoader {
    fn load(&self) -> Result<RelationGraph> {
        let bytes = self.read_source()?;
        let mut graph = RelationGraph::new();
        let mut skipped = 0usize;

        let parser = RdfParser::from_format(self.format.to_oxrdfio()).for_reader(bytes.as_ref());
        for quad in parser {
            let quad = quad.map_err(|e| {
                SkosError::parse(format!(
                    "failed to parse {} vocabulary {}: {e}",
                    self.format,
                    self.describe()
                ))
            })?;

            let Some(predicate) = Predicate::from_iri(quad.predicate.as_str()) else {
                skipped += 1;
                continue;
            };

            let subject = match quad.subject {
                Subject::NamedNode(node) => Resource::Iri(node.into_string()),
                Subject::BlankNode(node) => Resource::Blank(node.as_str().to_string()),
                #[allow(unreachable_patterns)]
                _ => {
                    warn!("skipping statement with unsupported subject in {}", self.describe());
                    continue;
                }
            };

            let object = match quad.object {
                Term::NamedNode(node) => Object::Resource(Resource::Iri(node.into_string())),
                Term::BlankNode(node) => Object::Resource(Resource::Blank(node.as_str().to_string())),
                Term::Literal(literal) => {
                    let language = literal.language().map(str::to_string);
                    Object::Literal(Literal {
                        value: literal.value().to_string(),
                        language,
                    })
                }
                #[allow(unreachable_patterns)]
                _ => {
                    warn!("skipping statement with unsupported object in {}", self.describe());
                    continue;
                }
            };

            graph.push(Statement {
                subject,
                predicate,
                object,
            });
        }

        debug!(
            "loaded {} SKOS statements from {} ({} other statements ignored)",
            graph.len(),
            self.describe(),
            skipped
        );

        Ok(graph)
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
            Source::File(path) => format!("'{}'", path.display()),
        }
    }
}

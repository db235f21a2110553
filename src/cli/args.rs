//! Command line argument parsing for the skos-analysis CLI using clap.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::skos::store::StoreConfig;

/// skos-analysis - SKOS thesaurus-aware term expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "skos-analysis")]
#[command(about = "Expand text with the labels and relations of a SKOS thesaurus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SkosArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SkosArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Expand a text with thesaurus terms
    Expand(ExpandArgs),

    /// Find the concepts carrying a label
    Lookup(LookupArgs),

    /// Show a concept record
    Concept(ConceptArgs),

    /// Show vocabulary statistics
    Stats(StatsArgs),
}

/// Options shared by every command that loads a vocabulary.
#[derive(Args, Debug, Clone)]
pub struct VocabularyArgs {
    /// Vocabulary file (N-Triples, Turtle, N3 or RDF/XML)
    #[arg(long, value_name = "FILE")]
    pub vocab: PathBuf,

    /// RDF serialization of the vocabulary; guessed from the extension when omitted
    #[arg(long, value_name = "SYNTAX")]
    pub rdf_format: Option<String>,

    /// Retain only labels in these languages (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,
}

impl VocabularyArgs {
    pub fn store_config(&self) -> StoreConfig {
        if self.languages.is_empty() {
            StoreConfig::new()
        } else {
            StoreConfig {
                languages: Some(self.languages.iter().cloned().collect::<HashSet<_>>()),
            }
        }
    }
}

/// Arguments for expanding a text
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Expansion configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Expansion kinds to emit (comma-separated, e.g. altLabel,broader)
    #[arg(short, long, value_delimiter = ',')]
    pub kinds: Vec<String>,

    /// Longest token window matched as one label
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Treat the text as a concept URI
    #[arg(long)]
    pub uri: bool,

    /// Text to expand
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for label lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Label kinds to search (comma-separated)
    #[arg(long, alias = "kinds", value_delimiter = ',', default_value = "pref,alt,hidden")]
    pub label_kinds: Vec<String>,

    /// Label to look up
    #[arg(value_name = "LABEL")]
    pub label: String,
}

/// Arguments for showing a concept
#[derive(Parser, Debug, Clone)]
pub struct ConceptArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Concept URI
    #[arg(value_name = "URI")]
    pub uri: String,
}

/// Arguments for vocabulary statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expand() {
        let args = SkosArgs::try_parse_from([
            "skos-analysis",
            "-v",
            "expand",
            "--vocab",
            "animals.ttl",
            "--kinds",
            "altLabel,broader",
            "--window",
            "3",
            "--languages",
            "en,fr",
            "the quick fox",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        let Command::Expand(expand) = args.command else {
            panic!("expected expand command");
        };
        assert_eq!(expand.kinds, vec!["altLabel", "broader"]);
        assert_eq!(expand.window, Some(3));
        assert_eq!(expand.text, "the quick fox");
        assert!(expand.vocabulary.store_config().accepts(Some("fr")));
        assert!(!expand.vocabulary.store_config().accepts(Some("de")));
    }

    #[test]
    fn test_parse_lookup_defaults() {
        let args = SkosArgs::try_parse_from([
            "skos-analysis",
            "-q",
            "--format",
            "json",
            "lookup",
            "--vocab",
            "animals.nt",
            "leaps",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        let Command::Lookup(lookup) = args.command else {
            panic!("expected lookup command");
        };
        assert_eq!(lookup.label_kinds, vec!["pref", "alt", "hidden"]);
        assert_eq!(lookup.vocabulary.store_config(), StoreConfig::default());
    }
}

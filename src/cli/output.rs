//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, SkosArgs};
use crate::error::Result;
use crate::skos::concept::{Concept, LabelKind, RelationKind};
use crate::skos::config::ExpansionMode;

/// Result structure for text expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub text: String,
    pub mode: ExpansionMode,
    pub tokens: Vec<Token>,
    pub expansions: usize,
}

/// Result structure for label lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub label: String,
    pub normalized: String,
    pub label_kinds: Vec<LabelKind>,
    pub concepts: Vec<String>,
}

/// Result structure for a concept query. `concept` is `None` for unknown URIs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptResult {
    pub uri: String,
    pub concept: Option<Concept>,
}

/// Vocabulary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub vocabulary: String,
    pub concepts: usize,
    pub distinct_labels: usize,
    pub pref_labels: usize,
    pub alt_labels: usize,
    pub hidden_labels: usize,
    pub relations: usize,
    pub max_label_tokens: usize,
    pub build_ms: u64,
}

/// Output a result in the specified format.
///
/// `human` renders the result for [`OutputFormat::Human`].
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &SkosArgs,
    human: fn(&T),
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            human(result);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SkosArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Print an expanded token stream, one token per line.
pub fn print_expansion(result: &ExpansionResult) {
    println!("Expanded Tokens:");
    println!("════════════════");

    for token in &result.tokens {
        match token.expansion_kind() {
            Some(kind) => println!(
                "  {:>4}  {:<24} [{}..{}] +{} ({kind})",
                token.position,
                token.text,
                token.start_offset,
                token.end_offset,
                token.position_length
            ),
            None => println!(
                "  {:>4}  {:<24} [{}..{}]",
                token.position, token.text, token.start_offset, token.end_offset
            ),
        }
    }

    println!();
    println!(
        "{} tokens, {} expansions",
        result.tokens.len(),
        result.expansions
    );
}

pub fn print_lookup(result: &LookupResult) {
    if result.concepts.is_empty() {
        println!("No concept labelled \"{}\"", result.normalized);
        return;
    }
    for uri in &result.concepts {
        println!("{uri}");
    }
}

pub fn print_concept(result: &ConceptResult) {
    let Some(concept) = &result.concept else {
        println!("Concept not found: {}", result.uri);
        return;
    };

    println!("Concept: {}", concept.uri);
    println!("═════════");
    for kind in LabelKind::ALL {
        let labels = concept.labels(kind);
        if !labels.is_empty() {
            println!("{:<20} {}", format!("{}Label:", kind.as_str()), labels.join(", "));
        }
    }
    for kind in RelationKind::ALL {
        let related = concept.related(kind);
        if !related.is_empty() {
            println!("{:<20} {}", format!("{}:", kind.as_str()), related.join(", "));
        }
    }
}

pub fn print_stats(stats: &VocabularyStats) {
    println!("Vocabulary Statistics:");
    println!("══════════════════════");
    println!("Vocabulary: {}", stats.vocabulary);
    println!("Concepts: {}", stats.concepts);
    println!("Distinct labels: {}", stats.distinct_labels);
    println!(
        "Labels: {} pref, {} alt, {} hidden",
        stats.pref_labels, stats.alt_labels, stats.hidden_labels
    );
    println!("Relations: {}", stats.relations);
    println!("Longest label: {} words", stats.max_label_tokens);
    println!("Build time: {}ms", stats.build_ms);
}

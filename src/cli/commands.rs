//! Command implementations for the skos-analysis CLI.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::skos::SkosAnalyzer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::skos::concept::{ExpansionKind, LabelKind, RelationKind};
use crate::skos::config::{ExpansionConfig, ExpansionMode};
use crate::skos::loader::{RdfFormat, RdfGraphLoader};
use crate::skos::store::{ConceptStore, StoreConfig};

/// Execute a CLI command.
pub fn execute_command(args: SkosArgs) -> Result<()> {
    match &args.command {
        Command::Expand(expand_args) => expand_text(expand_args, &args),
        Command::Lookup(lookup_args) => lookup_label(lookup_args, &args),
        Command::Concept(concept_args) => show_concept(concept_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Execute a CLI command, naming the command in the reported error.
pub fn run(args: SkosArgs) -> anyhow::Result<()> {
    let name = match &args.command {
        Command::Expand(_) => "expand",
        Command::Lookup(_) => "lookup",
        Command::Concept(_) => "concept",
        Command::Stats(_) => "stats",
    };
    execute_command(args).with_context(|| format!("{name} failed"))
}

/// Load and index the vocabulary named on the command line.
fn load_store(vocabulary: &VocabularyArgs, config: StoreConfig) -> Result<ConceptStore> {
    let loader = match &vocabulary.rdf_format {
        Some(name) => RdfGraphLoader::from_path(&vocabulary.vocab, name.parse::<RdfFormat>()?),
        None => RdfGraphLoader::from_path_guess(&vocabulary.vocab)?,
    };
    debug!(
        "loading {} vocabulary {}",
        loader.format(),
        vocabulary.vocab.display()
    );
    ConceptStore::build(&loader, config)
}

/// Merge the configuration file with command line overrides.
pub fn expansion_config(args: &ExpandArgs) -> Result<ExpansionConfig> {
    let mut config = match &args.config {
        Some(path) => ExpansionConfig::from_file(path)?,
        None => ExpansionConfig::default(),
    };

    if !args.kinds.is_empty() {
        config.expansion_kinds = args
            .kinds
            .iter()
            .map(|kind| kind.parse::<ExpansionKind>())
            .collect::<Result<_>>()?;
    }
    if let Some(window) = args.window {
        config.window_size = window;
    }
    if args.uri {
        config.mode = ExpansionMode::Uri;
        config.window_size = 1;
    }
    if !args.vocabulary.languages.is_empty() {
        config.languages = Some(args.vocabulary.languages.clone());
    }

    config.validate()?;
    Ok(config)
}

fn expand_text(args: &ExpandArgs, cli_args: &SkosArgs) -> Result<()> {
    let config = expansion_config(args)?;
    let store = Arc::new(load_store(&args.vocabulary, config.store_config())?);
    let analyzer = SkosAnalyzer::from_config(store, &config)?;

    let tokens: Vec<_> = analyzer.analyze(&args.text)?.collect();
    let expansions = tokens.iter().filter(|token| token.is_expansion()).count();

    output_result(
        "Expansion complete",
        &ExpansionResult {
            text: args.text.clone(),
            mode: config.mode,
            tokens,
            expansions,
        },
        cli_args,
        print_expansion,
    )
}

fn lookup_label(args: &LookupArgs, cli_args: &SkosArgs) -> Result<()> {
    let label_kinds = args
        .label_kinds
        .iter()
        .map(|kind| kind.parse::<LabelKind>())
        .collect::<Result<Vec<_>>>()?;
    let store = load_store(&args.vocabulary, args.vocabulary.store_config())?;

    let concepts = store
        .lookup_by_label(&args.label, &label_kinds)
        .into_iter()
        .map(str::to_string)
        .collect();

    output_result(
        "Lookup complete",
        &LookupResult {
            label: args.label.clone(),
            normalized: store.normalizer().normalize(&args.label),
            label_kinds,
            concepts,
        },
        cli_args,
        print_lookup,
    )
}

fn show_concept(args: &ConceptArgs, cli_args: &SkosArgs) -> Result<()> {
    let store = load_store(&args.vocabulary, args.vocabulary.store_config())?;

    output_result(
        "Concept lookup complete",
        &ConceptResult {
            uri: args.uri.clone(),
            concept: store.concept(&args.uri).cloned(),
        },
        cli_args,
        print_concept,
    )
}

fn show_stats(args: &StatsArgs, cli_args: &SkosArgs) -> Result<()> {
    let start = Instant::now();
    let store = load_store(&args.vocabulary, args.vocabulary.store_config())?;
    let build_ms = start.elapsed().as_millis() as u64;

    let count_labels =
        |kind: LabelKind| -> usize { store.concepts().map(|c| c.labels(kind).len()).sum() };
    let relations = store
        .concepts()
        .map(|concept| {
            [RelationKind::Broader, RelationKind::Narrower, RelationKind::Related]
                .into_iter()
                .map(|kind| concept.related(kind).len())
                .sum::<usize>()
        })
        .sum();

    output_result(
        "Statistics collected",
        &VocabularyStats {
            vocabulary: args.vocabulary.vocab.display().to_string(),
            concepts: store.len(),
            distinct_labels: store.label_count(),
            pref_labels: count_labels(LabelKind::Pref),
            alt_labels: count_labels(LabelKind::Alt),
            hidden_labels: count_labels(LabelKind::Hidden),
            relations,
            max_label_tokens: store.max_label_tokens(),
            build_ms,
        },
        cli_args,
        print_stats,
    )
}

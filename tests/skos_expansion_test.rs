use std::fs;
use std::sync::Arc;

use skos_analysis::analysis::analyzer::Analyzer;
use skos_analysis::analysis::analyzer::pipeline::PipelineAnalyzer;
use skos_analysis::analysis::analyzer::skos::SkosAnalyzer;
use skos_analysis::analysis::token::{Token, TokenType};
use skos_analysis::analysis::token_filter::lowercase::LowercaseFilter;
use skos_analysis::analysis::token_filter::skos_label::SkosLabelFilter;
use skos_analysis::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use skos_analysis::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use skos_analysis::error::{Result, SkosError};
use skos_analysis::skos::concept::{ExpansionKind, LabelKind};
use skos_analysis::skos::config::{ExpansionConfig, ExpansionMode};
use skos_analysis::skos::expander::{ExpansionState, LabelExpander};
use skos_analysis::skos::graph::RelationGraph;
use skos_analysis::skos::loader::RdfGraphLoader;
use skos_analysis::skos::source::ConceptSource;
use skos_analysis::skos::store::{ConceptStore, StoreConfig};
use tempfile::TempDir;

const PLACES_TTL: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix ex: <http://example.com/places/> .

ex:ny skos:prefLabel "New York"@en ;
    skos:altLabel "NY"@en .

ex:nyc skos:prefLabel "New York City"@en ;
    skos:altLabel "Big Apple"@en , "NYC"@en ;
    skos:broader ex:ny .

ex:us skos:prefLabel "United States"@en ;
    skos:narrower ex:ny .

ex:ny skos:broader ex:us .
"#;

fn places() -> Result<(TempDir, Arc<ConceptStore>)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("places.ttl");
    fs::write(&path, PLACES_TTL)?;
    let store = ConceptStore::build(&RdfGraphLoader::from_path_guess(&path)?, StoreConfig::default())?;
    Ok((dir, Arc::new(store)))
}

fn leaps_and_jumps() -> Result<Arc<ConceptStore>> {
    let mut graph = RelationGraph::new();
    graph
        .add_label("ex:1", LabelKind::Pref, "leaps", None)
        .add_label("ex:2", LabelKind::Pref, "jumps", None)
        .add_label("ex:2", LabelKind::Alt, "leaps", None);
    Ok(Arc::new(ConceptStore::build(&graph, StoreConfig::default())?))
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

#[test]
fn test_label_lookup_across_kinds() -> Result<()> {
    let store = leaps_and_jumps()?;

    let mut concepts = store.concepts_for_label("leaps", &[LabelKind::Pref, LabelKind::Alt])?;
    concepts.sort();
    assert_eq!(concepts, vec!["ex:1", "ex:2"]);

    Ok(())
}

#[test]
fn test_alt_label_expansion_is_co_positioned() -> Result<()> {
    let config = ExpansionConfig::new(ExpansionMode::Label, vec![ExpansionKind::AltLabel]);
    let analyzer = SkosAnalyzer::from_config(leaps_and_jumps()?, &config)?;

    let tokens: Vec<Token> = analyzer.analyze("jumps")?.collect();

    assert_eq!(texts(&tokens), vec!["jumps", "leaps"]);
    assert_eq!(tokens[0].position, tokens[1].position);
    assert_eq!(tokens[1].position_increment, 0);
    assert_eq!(tokens[1].token_type(), Some(TokenType::Expansion));

    Ok(())
}

#[test]
fn test_shared_label_expands_every_concept() -> Result<()> {
    let config = ExpansionConfig::new(
        ExpansionMode::Label,
        vec![ExpansionKind::PrefLabel, ExpansionKind::AltLabel],
    );
    let analyzer = SkosAnalyzer::from_config(leaps_and_jumps()?, &config)?;

    let tokens: Vec<Token> = analyzer.analyze("Leaps")?.collect();

    assert_eq!(texts(&tokens), vec!["leaps", "leaps", "jumps", "leaps"]);
    assert!(tokens[1..].iter().all(|token| token.position == 0));

    Ok(())
}

#[test]
fn test_uri_expansion() -> Result<()> {
    let config = ExpansionConfig::new(ExpansionMode::Uri, vec![ExpansionKind::PrefLabel]);
    let analyzer = SkosAnalyzer::from_config(leaps_and_jumps()?, &config)?;

    let tokens: Vec<Token> = analyzer.analyze("ex:1")?.collect();
    assert_eq!(texts(&tokens), vec!["ex:1", "leaps"]);

    let untouched: Vec<Token> = analyzer.analyze("ex:404")?.collect();
    assert_eq!(texts(&untouched), vec!["ex:404"]);

    Ok(())
}

#[test]
fn test_greedy_longest_match_over_document() -> Result<()> {
    let (_dir, store) = places()?;
    let config = ExpansionConfig::new(
        ExpansionMode::Label,
        vec![ExpansionKind::AltLabel, ExpansionKind::BroaderTransitive],
    )
    .with_window_size(store.max_label_tokens());
    let analyzer = SkosAnalyzer::from_config(store, &config)?;

    let tokens: Vec<Token> = analyzer.analyze("Flights to New York City, New York.")?.collect();

    assert_eq!(
        texts(&tokens),
        vec![
            "flights",
            "to",
            "new",
            "big apple",
            "nyc",
            "new york",
            "ny",
            "united states",
            "york",
            "city",
            "new",
            "ny",
            "united states",
            "york",
        ]
    );

    // Expansions of the three-word match span the whole window.
    let big_apple = &tokens[3];
    assert_eq!(big_apple.position, 2);
    assert_eq!(big_apple.start_offset, 11);
    assert_eq!(big_apple.position_length, 3);
    assert_eq!(big_apple.expansion_kind(), Some(ExpansionKind::AltLabel));

    // Trailing window tokens keep their own positions.
    assert_eq!(tokens[8].position, 3);
    assert_eq!(tokens[9].position, 4);
    assert_eq!(tokens[13].position, 6);

    Ok(())
}

#[test]
fn test_no_match_is_identity() -> Result<()> {
    let (_dir, store) = places()?;
    let filter = SkosLabelFilter::new(store, ExpansionKind::ALL.to_vec()).with_window_size(3);
    let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()));

    let input: Vec<Token> = analyzer.analyze("the quick brown fox")?.collect();
    let mut expander = filter.expander(input.clone().into_iter());

    let mut output = Vec::new();
    while let Some(token) = expander.next_token()? {
        assert_eq!(expander.pending(), 0);
        output.push(token);
    }

    assert_eq!(output, input);
    assert_eq!(expander.state(), ExpansionState::Exhausted);

    Ok(())
}

#[test]
fn test_whitespace_pipeline_matches_normalized_labels() -> Result<()> {
    let (_dir, store) = places()?;
    let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(SkosLabelFilter::new(store, vec![ExpansionKind::AltLabel])));

    let tokens: Vec<Token> = analyzer.analyze("Visit New-York")?.collect();

    // "new-york" stays one token but normalizes to the label "new york".
    assert_eq!(texts(&tokens), vec!["visit", "new-york", "ny"]);
    assert_eq!(tokens[2].position, 1);
    assert_eq!(tokens[2].position_length, 1);

    Ok(())
}

struct FlakySource {
    inner: Arc<ConceptStore>,
}

impl ConceptSource for FlakySource {
    fn concepts_for_label(&self, text: &str, kinds: &[LabelKind]) -> Result<Vec<String>> {
        if text.contains("york") {
            return Err(SkosError::store("index segment unavailable"));
        }
        self.inner.concepts_for_label(text, kinds)
    }

    fn contains_concept(&self, uri: &str) -> Result<bool> {
        self.inner.contains_concept(uri)
    }

    fn expansions(&self, uri: &str, kind: ExpansionKind) -> Result<Vec<String>> {
        self.inner.expansions(uri, kind)
    }
}

#[test]
fn test_source_failure_is_reported_with_token() -> Result<()> {
    let (_dir, store) = places()?;
    let source = Arc::new(FlakySource { inner: store });
    let input = vec![
        Token::with_offsets("visit", 0, 0, 5),
        Token::with_offsets("new", 1, 6, 9),
        Token::with_offsets("york", 2, 10, 14),
    ];

    let mut expander = LabelExpander::new(input.into_iter(), source, vec![ExpansionKind::AltLabel])
        .with_window_size(2);

    assert_eq!(expander.next_token()?.map(|t| t.text), Some("visit".to_string()));

    let err = expander.next_token().unwrap_err();
    assert!(matches!(err, SkosError::Analysis(_)));
    assert!(err.to_string().contains("'new' at position 1"), "{err}");
    assert_eq!(expander.state(), ExpansionState::Exhausted);
    assert!(expander.next_token()?.is_none());

    Ok(())
}

#[test]
fn test_config_file_drives_analyzer() -> Result<()> {
    let (dir, store) = places()?;
    let path = dir.path().join("expansion.json");
    fs::write(
        &path,
        r#"{ "mode": "label", "expansionKinds": ["narrower"], "windowSize": 2 }"#,
    )?;

    let config = ExpansionConfig::from_file(&path)?;
    let analyzer = SkosAnalyzer::from_config(store, &config)?;
    let tokens: Vec<Token> = analyzer.analyze("United States")?.collect();

    assert_eq!(texts(&tokens), vec!["united", "new york", "ny", "states"]);

    Ok(())
}

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use skos_analysis::error::{Result, SkosError};
use skos_analysis::skos::concept::{LabelKind, RelationKind};
use skos_analysis::skos::loader::{GraphLoader, RdfFormat, RdfGraphLoader};
use skos_analysis::skos::store::{ConceptStore, StoreConfig};
use tempfile::TempDir;

const ANIMALS_TTL: &str = r#"
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix ex: <http://example.com/animals/> .

ex:animal a skos:Concept ;
    skos:prefLabel "Animal"@en , "Tier"@de ;
    skos:narrower ex:mammal .

ex:mammal skos:prefLabel "Mammal"@en ;
    skos:broader ex:animal ;
    skos:narrower ex:dog .

ex:dog skos:prefLabel "Dog"@en , "Hund"@de ;
    skos:altLabel "Domestic Dog"@en , "Canis familiaris" ;
    skos:hiddenLabel "dgo"@en ;
    skos:broader ex:mammal ;
    skos:related ex:leash .

ex:leash skos:prefLabel "Leash"@en .

ex:orphan a skos:Concept .
ex:unlabelled skos:broader ex:animal .
"#;

fn write_vocabulary(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

fn animals(config: StoreConfig) -> Result<(TempDir, ConceptStore)> {
    let dir = TempDir::new()?;
    let path = write_vocabulary(&dir, "animals.ttl", ANIMALS_TTL)?;
    let loader = RdfGraphLoader::from_path_guess(&path)?;
    let store = ConceptStore::build(&loader, config)?;
    Ok((dir, store))
}

#[test]
fn test_build_from_turtle_file() -> Result<()> {
    let (_dir, store) = animals(StoreConfig::default())?;

    // Only labelled resources become concepts.
    assert_eq!(store.len(), 4);
    assert!(store.contains("http://example.com/animals/dog"));
    assert!(!store.contains("http://example.com/animals/orphan"));
    assert!(!store.contains("http://example.com/animals/unlabelled"));

    let dog = store
        .concept("http://example.com/animals/dog")
        .expect("dog is a concept");
    assert_eq!(dog.pref_labels, vec!["dog", "hund"]);
    assert_eq!(dog.alt_labels, vec!["domestic dog", "canis familiaris"]);
    assert_eq!(dog.hidden_labels, vec!["dgo"]);
    assert_eq!(dog.related, vec!["http://example.com/animals/leash"]);
    assert_eq!(store.max_label_tokens(), 2);

    Ok(())
}

#[test]
fn test_lookup_by_label() -> Result<()> {
    let (_dir, store) = animals(StoreConfig::default())?;

    assert_eq!(
        store.lookup_by_label("Domestic  DOG", &[LabelKind::Alt]),
        vec!["http://example.com/animals/dog"]
    );
    assert!(
        store
            .lookup_by_label("Domestic Dog", &[LabelKind::Pref, LabelKind::Hidden])
            .is_empty()
    );
    assert_eq!(
        store.lookup_by_label("dgo", &LabelKind::ALL),
        vec!["http://example.com/animals/dog"]
    );

    Ok(())
}

#[test]
fn test_transitive_relations() -> Result<()> {
    let (_dir, store) = animals(StoreConfig::default())?;

    assert_eq!(
        store.related("http://example.com/animals/dog", RelationKind::BroaderTransitive),
        [
            "http://example.com/animals/mammal",
            "http://example.com/animals/animal"
        ]
    );
    assert_eq!(
        store.related("http://example.com/animals/animal", RelationKind::NarrowerTransitive),
        [
            "http://example.com/animals/mammal",
            "http://example.com/animals/dog"
        ]
    );
    assert_eq!(
        store.relation_labels("http://example.com/animals/dog", RelationKind::BroaderTransitive),
        vec!["mammal", "animal", "tier"]
    );

    Ok(())
}

#[test]
fn test_language_restricted_build() -> Result<()> {
    let (_dir, store) = animals(StoreConfig::new().with_languages(["de"]))?;

    // Concepts stay concepts even when every label is filtered out.
    assert_eq!(store.len(), 4);
    assert_eq!(
        store.labels("http://example.com/animals/dog", LabelKind::Pref),
        ["hund"]
    );
    assert!(
        store
            .labels("http://example.com/animals/dog", LabelKind::Alt)
            .is_empty()
    );
    assert!(store.lookup_by_label("dog", &LabelKind::ALL).is_empty());
    assert_eq!(
        store.lookup_by_label("Tier", &[LabelKind::Pref]),
        vec!["http://example.com/animals/animal"]
    );

    Ok(())
}

#[test]
fn test_cyclic_hierarchy() -> Result<()> {
    let data = r#"
<http://ex/a> <http://www.w3.org/2004/02/skos/core#prefLabel> "a" .
<http://ex/b> <http://www.w3.org/2004/02/skos/core#prefLabel> "b" .
<http://ex/a> <http://www.w3.org/2004/02/skos/core#broader> <http://ex/b> .
<http://ex/b> <http://www.w3.org/2004/02/skos/core#broader> <http://ex/a> .
<http://ex/b> <http://www.w3.org/2004/02/skos/core#broader> "not a resource" .
"#;
    let loader = RdfGraphLoader::from_reader(data.as_bytes(), RdfFormat::NTriples)?;
    let store = ConceptStore::build(&loader, StoreConfig::default())?;

    for concept in store.concepts() {
        let closure = store.related(&concept.uri, RelationKind::BroaderTransitive);
        assert!(!closure.contains(&concept.uri));
        assert_eq!(closure.iter().collect::<HashSet<_>>().len(), closure.len());
    }
    assert_eq!(
        store.related("http://ex/b", RelationKind::Broader),
        ["http://ex/a"]
    );

    Ok(())
}

const ANIMALS_RDF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <skos:Concept rdf:about="http://example.com/animals/dog">
    <skos:prefLabel xml:lang="en">Dog</skos:prefLabel>
    <skos:prefLabel xml:lang="de">Hund</skos:prefLabel>
    <skos:altLabel xml:lang="en">Domestic Dog</skos:altLabel>
    <skos:broader rdf:resource="http://example.com/animals/mammal"/>
  </skos:Concept>
  <skos:Concept rdf:about="http://example.com/animals/mammal">
    <skos:prefLabel xml:lang="en">Mammal</skos:prefLabel>
  </skos:Concept>
</rdf:RDF>
"#;

#[test]
fn test_build_from_rdf_xml_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vocabulary(&dir, "animals.rdf", ANIMALS_RDF)?;
    let loader = RdfGraphLoader::from_path_guess(&path)?;
    assert_eq!(loader.format(), RdfFormat::RdfXml);

    let store = ConceptStore::build(&loader, StoreConfig::new().with_languages(["en"]))?;

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.lookup_by_label("domestic dog", &[LabelKind::Alt]),
        vec!["http://example.com/animals/dog"]
    );
    assert!(store.lookup_by_label("hund", &LabelKind::ALL).is_empty());
    assert_eq!(
        store.relation_labels("http://example.com/animals/dog", RelationKind::Broader),
        vec!["mammal"]
    );

    Ok(())
}

#[test]
fn test_empty_vocabulary() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vocabulary(&dir, "empty.nt", "")?;
    let store = ConceptStore::build(&RdfGraphLoader::from_path_guess(&path)?, StoreConfig::default())?;

    assert!(store.is_empty());
    assert!(store.concept("http://ex/a").is_none());
    assert!(store.lookup_by_label("a", &LabelKind::ALL).is_empty());
    assert!(store.related("http://ex/a", RelationKind::Related).is_empty());
    assert!(store.labels("http://ex/a", LabelKind::Pref).is_empty());

    Ok(())
}

#[test]
fn test_build_failures() -> Result<()> {
    let dir = TempDir::new()?;

    let err = "JSON-LD".parse::<RdfFormat>().unwrap_err();
    assert!(matches!(err, SkosError::Format(_)));

    let broken = write_vocabulary(&dir, "broken.ttl", "<http://ex/a> skos:prefLabel")?;
    let loader = RdfGraphLoader::from_path_guess(&broken)?;
    let err = ConceptStore::build(&loader, StoreConfig::default()).unwrap_err();
    assert!(matches!(err, SkosError::Parse(_)));
    assert!(err.to_string().contains("broken.ttl"));

    let missing = RdfGraphLoader::from_path(dir.path().join("missing.ttl"), RdfFormat::Turtle);
    assert!(matches!(missing.load(), Err(SkosError::Io(_))));

    Ok(())
}

#[test]
fn test_concurrent_queries() -> Result<()> {
    let (_dir, store) = animals(StoreConfig::default())?;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..100)
                    .map(|_| store.lookup_by_label("mammal", &[LabelKind::Pref]).len())
                    .sum::<usize>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("query thread panicked"), 100);
    }

    Ok(())
}

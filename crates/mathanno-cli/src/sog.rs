//! Grounding-span report for one paper.

use crate::paths;
use anyhow::Result;
use colored::Colorize;
use mathanno_index::words::WordSequence;
use mathanno_index::DocumentIndex;
use mathanno_model::{AnnotationStore, ConceptDictionary, IdentifierKey, TracingDiagnostics};
use mathanno_stats::sog_length_stats;
use mathanno_storage::{read_annotation, read_dictionary};
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(paper_id: &str, data_dir: &Path, sources_dir: &Path, show_sog: bool) -> Result<()> {
    let diag = TracingDiagnostics;

    let store = read_annotation(&paths::anno_json(data_dir, paper_id), &diag)?;
    let dictionary = read_dictionary(&paths::mcdict_json(data_dir, paper_id), &diag)?;
    let html = paths::read_source_html(sources_dir, paper_id)?;
    let index = DocumentIndex::build(&html);
    let words = WordSequence::from_html(&html);

    println!("{}", "* Sources of grounding".bold());
    println!("#SoG: {}", store.sog_count());
    println!();

    println!("{}", "* Number of SoG for each concept".bold());
    crate::analyze::print_distribution(sog_length_stats(&store, &dictionary, &index).as_ref());

    if show_sog {
        println!();
        print_phrases(&store, &dictionary, &index, &words);
    }

    Ok(())
}

/// List the cited phrases, grouped per assigned concept in key order.
fn print_phrases(
    store: &AnnotationStore,
    dictionary: &ConceptDictionary,
    index: &DocumentIndex,
    words: &WordSequence,
) {
    let mut by_concept: BTreeMap<(IdentifierKey, usize), Vec<String>> = BTreeMap::new();
    for (occurrence_id, record) in &store.occurrences {
        let Some(concept_id) = record.concept_id else {
            continue;
        };
        let Some(key) = index.key(occurrence_id) else {
            continue;
        };
        let phrases = by_concept.entry((key.clone(), concept_id)).or_default();
        for span in &record.sog {
            let phrase = words
                .phrase(&span.start, &span.stop)
                .unwrap_or_else(|| format!("<unresolved: {}..{}>", span.start, span.stop));
            phrases.push(phrase);
        }
    }

    println!("{}", "* SoG by concept".bold());
    for ((key, concept_id), phrases) in &by_concept {
        let symbol = key.hex.decode_text().unwrap_or_else(|| key.hex.to_string());
        let description = dictionary
            .lookup(&key.hex, &key.variant, *concept_id)
            .map(|concept| concept.description.clone())
            .unwrap_or_else(|_| "<unknown concept>".to_string());
        println!("{symbol} ({}) #{concept_id}: {description}", key.variant);
        if phrases.is_empty() {
            println!("    (no SoG)");
        }
        for phrase in phrases {
            println!("    - {phrase}");
        }
    }
}

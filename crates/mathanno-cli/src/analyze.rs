//! Descriptive statistics report for one paper.

use crate::paths;
use anyhow::Result;
use colored::Colorize;
use mathanno_index::DocumentIndex;
use mathanno_model::TracingDiagnostics;
use mathanno_stats::{annotation_stats, dictionary_stats, Distribution};
use mathanno_storage::{read_annotation, read_dictionary};
use std::path::Path;

pub fn run(paper_id: &str, data_dir: &Path, sources_dir: &Path) -> Result<()> {
    let diag = TracingDiagnostics;

    let store = read_annotation(&paths::anno_json(data_dir, paper_id), &diag)?;
    let dictionary = read_dictionary(&paths::mcdict_json(data_dir, paper_id), &diag)?;
    let html = paths::read_source_html(sources_dir, paper_id)?;
    let index = DocumentIndex::build(&html);

    println!("{}", "* Basic information".bold());
    println!("Paper ID: {paper_id}");
    println!("Author of math concept dict: {}", dictionary.author);
    println!("Annotator: {}", store.annotator);
    println!("#types of identifiers: {}", dictionary.concepts.len());
    println!("#occurrences: {}", store.len());
    println!();

    let dict_stats = dictionary_stats(&dictionary);
    println!("{}", "* Math concept dictionary".bold());
    println!("#entries (identifiers): {}", dict_stats.entries);
    println!("#items (math concepts): {}", dict_stats.concepts);
    println!(
        "#entries with multiple items: {}",
        dict_stats.entries_with_multiple
    );
    println!();

    println!("{}", "* Number of items in each entry".bold());
    print_distribution(dict_stats.concepts_per_entry.as_ref());
    println!();

    let anno_stats = annotation_stats(&store, &dictionary, &index);
    println!("{}", "* Annotation".bold());
    println!(
        "Progress rate: {} ({}/{})",
        paths::fmt_rate(anno_stats.progress_rate),
        anno_stats.annotated,
        anno_stats.occurrences
    );
    match anno_stats.average_candidates {
        Some(avg) => println!("Average #candidates: {avg:.1}"),
        None => println!("Average #candidates: N/A"),
    }
    println!("#SoG: {}", anno_stats.sog_count);
    println!("#orphaned concepts: {}", anno_stats.orphaned_concepts);

    Ok(())
}

pub fn print_distribution(dist: Option<&Distribution>) {
    let Some(dist) = dist else {
        println!("(no data)");
        return;
    };
    println!("Max: {}", dist.max);
    println!("Median: {}", dist.median);
    println!("Mean: {:.1}", dist.mean);
    println!("Variance: {:.1}", dist.variance);
    println!("Standard deviation: {:.1}", dist.std_dev);
}

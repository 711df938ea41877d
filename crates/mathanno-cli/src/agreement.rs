//! Agreement report between two annotation sets.

use crate::paths;
use anyhow::Result;
use colored::Colorize;
use mathanno_agreement::span::span_overlap;
use mathanno_agreement::{compare, AgreementReport};
use mathanno_index::words::WordSequence;
use mathanno_index::DocumentIndex;
use mathanno_model::TracingDiagnostics;
use mathanno_storage::{read_annotation, read_dictionary};
use std::path::Path;

pub fn run(
    paper_id: &str,
    reference_dir: &Path,
    target_dir: &Path,
    sources_dir: &Path,
    show_mismatch: bool,
) -> Result<()> {
    let diag = TracingDiagnostics;

    let reference = read_annotation(&paths::anno_json(reference_dir, paper_id), &diag)?;
    let dictionary = read_dictionary(&paths::mcdict_json(reference_dir, paper_id), &diag)?;
    let target = read_annotation(&paths::anno_json(target_dir, paper_id), &diag)?;
    let target_dictionary = read_dictionary(&paths::mcdict_json(target_dir, paper_id), &diag)?;

    let html = paths::read_source_html(sources_dir, paper_id)?;
    let index = DocumentIndex::build(&html);
    let words = WordSequence::from_html(&html);

    let report = compare(&reference, &dictionary, &target, &index, &diag);

    if show_mismatch {
        print_mismatches(&report);
    }

    println!("{}", "* Summary".bold());
    println!(
        "Reference data: Annotation by {}, Math concept dict by {}",
        reference.annotator, dictionary.author
    );
    println!(
        "Target data: Annotation by {}, Math concept dict by {}",
        target.annotator, target_dictionary.author
    );
    println!(
        "Agreement: {}/{} = {}",
        report.positive,
        report.total(),
        paths::fmt_rate(report.agreement_rate())
    );
    println!(
        "Pattern mismatches: {}/{} = {}",
        report.pattern_mismatch,
        report.negative,
        paths::fmt_rate(report.pattern_mismatch_rate())
    );

    println!();
    println!("{}", "* Kappas".bold());
    println!("symbol\tvariation\tKappa\tcount");
    for group in &report.per_identifier {
        let symbol = group
            .key
            .hex
            .decode_text()
            .unwrap_or_else(|| group.key.hex.to_string());
        println!(
            "{symbol}\t{}\t{}\t{}",
            group.key.variant,
            paths::fmt_kappa(group.kappa),
            group.count
        );
    }
    println!(
        "Kappa (weighted avg.): {}",
        paths::fmt_kappa(report.weighted_kappa)
    );

    let overlap = span_overlap(&reference, &target, &words, &diag);
    println!();
    println!("{}", "* Span overlap".bold());
    println!("Reference spans: {}", overlap.reference_total);
    println!("Target spans: {}", overlap.target_total);
    println!("Overlapping pairs, same concept: {}", overlap.positive);
    println!("Overlapping pairs, different concept: {}", overlap.negative);

    Ok(())
}

fn print_mismatches(report: &AgreementReport) {
    println!("{}", "* Mismatches".bold());
    println!("ID\tReference Concept\tAnnotated Concept\tPattern Agreed");
    for mismatch in &report.mismatches {
        println!(
            "{}\t{} ({})\t{} ({})\t{}",
            mismatch.occurrence_id,
            mismatch.reference_concept,
            mismatch.reference_description,
            mismatch.target_concept,
            mismatch.target_description,
            mismatch.pattern_agreed
        );
    }
    println!();
}

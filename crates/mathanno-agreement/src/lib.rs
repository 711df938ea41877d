//! Inter-annotator agreement engine
//!
//! Compares two independently produced annotation stores over the same
//! paper against the reference concept dictionary and the document index.
//! Read-only; produces:
//!
//! - label agreement (same concept id chosen),
//! - affix-pattern agreement among the disagreements,
//! - Cohen's kappa per identifier key and a count-weighted overall value,
//! - grounding-span overlap agreement.
//!
//! Degenerate denominators (no disagreements, no variance, empty label
//! pools) are explicit `None` results, excluded from every average.

pub mod kappa;
pub mod span;

use mathanno_index::DocumentIndex;
use mathanno_model::{
    AnnotationStore, ConceptDictionary, Diagnostics, IdentifierKey,
};
use std::collections::BTreeMap;

/// One disagreement, kept for the mismatch detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub occurrence_id: String,
    pub reference_concept: usize,
    pub reference_description: String,
    pub target_concept: usize,
    pub target_description: String,
    pub pattern_agreed: bool,
}

/// Kappa for one identifier key's pooled label pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierKappa {
    pub key: IdentifierKey,
    pub kappa: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgreementReport {
    /// Occurrences where both annotators chose the same concept id.
    pub positive: usize,
    /// Occurrences where the chosen concept ids differ.
    pub negative: usize,
    /// Disagreements whose concepts share the same affix pattern.
    pub pattern_agreed: usize,
    /// Disagreements whose affix patterns differ too.
    pub pattern_mismatch: usize,
    /// Target occurrences left unannotated; excluded from all denominators.
    pub unannotated: usize,
    pub mismatches: Vec<Mismatch>,
    /// Per identifier key, ordered by descending label count.
    pub per_identifier: Vec<IdentifierKappa>,
    /// Count-weighted average over the defined per-identifier kappas.
    pub weighted_kappa: Option<f64>,
}

impl AgreementReport {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }

    /// positive / (positive + negative); `None` when nothing was compared.
    pub fn agreement_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.positive as f64 / total as f64)
    }

    /// pattern_mismatch / negative; `None` when there are no disagreements.
    pub fn pattern_mismatch_rate(&self) -> Option<f64> {
        (self.negative > 0).then(|| self.pattern_mismatch as f64 / self.negative as f64)
    }
}

/// Compare the target store against the reference store, resolving concepts
/// through the reference dictionary and identifier keys through the index.
///
/// Iterates the reference store's occurrence ids; occurrences missing from
/// the target store or unresolvable in the index are reported through the
/// diagnostics sink and skipped rather than failing the whole comparison.
pub fn compare(
    reference: &AnnotationStore,
    dictionary: &ConceptDictionary,
    target: &AnnotationStore,
    index: &DocumentIndex,
    diag: &dyn Diagnostics,
) -> AgreementReport {
    let mut report = AgreementReport::default();
    let mut labels: BTreeMap<IdentifierKey, (Vec<usize>, Vec<usize>)> = BTreeMap::new();

    for (occurrence_id, reference_record) in &reference.occurrences {
        let Some(target_record) = target.get(occurrence_id) else {
            diag.warn(&format!("{occurrence_id}: missing from the target store"));
            continue;
        };
        let Some(target_id) = target_record.concept_id else {
            report.unannotated += 1;
            continue;
        };
        let Some(reference_id) = reference_record.concept_id else {
            diag.warn(&format!("{occurrence_id}: unannotated in the reference store"));
            continue;
        };
        let Some(key) = index.key(occurrence_id) else {
            diag.warn(&format!("{occurrence_id}: not resolvable in the document index"));
            continue;
        };

        let pools = labels.entry(key.clone()).or_default();
        pools.0.push(reference_id);
        pools.1.push(target_id);

        if target_id == reference_id {
            report.positive += 1;
            continue;
        }
        report.negative += 1;

        let reference_concept = dictionary.lookup(&key.hex, &key.variant, reference_id);
        let target_concept = dictionary.lookup(&key.hex, &key.variant, target_id);
        match (reference_concept, target_concept) {
            (Ok(reference_concept), Ok(target_concept)) => {
                let pattern_agreed = reference_concept.affixes == target_concept.affixes;
                if pattern_agreed {
                    report.pattern_agreed += 1;
                } else {
                    report.pattern_mismatch += 1;
                }
                report.mismatches.push(Mismatch {
                    occurrence_id: occurrence_id.clone(),
                    reference_concept: reference_id,
                    reference_description: reference_concept.description.clone(),
                    target_concept: target_id,
                    target_description: target_concept.description.clone(),
                    pattern_agreed,
                });
            }
            (reference_concept, target_concept) => {
                for err in [reference_concept.err(), target_concept.err()].into_iter().flatten() {
                    diag.warn(&format!("{occurrence_id}: {err}"));
                }
            }
        }
    }

    if report.unannotated > 0 {
        diag.warn(&format!(
            "found {} unannotated occurrence(s)",
            report.unannotated
        ));
    }

    report.per_identifier = labels
        .into_iter()
        .map(|(key, (reference_labels, target_labels))| IdentifierKappa {
            key,
            kappa: kappa::cohen_kappa(&reference_labels, &target_labels),
            count: reference_labels.len(),
        })
        .collect();
    report
        .per_identifier
        .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    report.weighted_kappa = kappa::weighted_average(
        report
            .per_identifier
            .iter()
            .map(|group| (group.kappa, group.count)),
    );
    report
}

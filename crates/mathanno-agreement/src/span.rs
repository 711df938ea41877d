//! Grounding-span overlap agreement.
//!
//! Each store's spans are flattened into (position interval, concept id)
//! pairs by resolving word ids against the document's word order. Every
//! overlapping (reference, target) pair is counted — all pairs, not a
//! one-to-one matching, so clustered spans can contribute more than once.
//! That mirrors the established measurement and is kept deliberately.

use mathanno_index::words::WordSequence;
use mathanno_model::{AnnotationStore, Diagnostics};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanOverlapReport {
    /// Total spans in the reference store, resolvable or not.
    pub reference_total: usize,
    /// Total spans in the target store, resolvable or not.
    pub target_total: usize,
    /// Overlapping pairs whose concept ids match.
    pub positive: usize,
    /// Overlapping pairs whose concept ids differ.
    pub negative: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlatSpan {
    lo: usize,
    hi: usize,
    concept_id: Option<usize>,
}

impl FlatSpan {
    fn overlaps(&self, other: &FlatSpan) -> bool {
        // Disjoint only when one interval ends strictly before the other
        // begins; shared endpoints overlap.
        !(self.hi < other.lo || self.lo > other.hi)
    }
}

fn flatten(
    store: &AnnotationStore,
    words: &WordSequence,
    diag: &dyn Diagnostics,
) -> (usize, Vec<FlatSpan>) {
    let mut total = 0;
    let mut flat = Vec::new();
    for (occurrence_id, record) in &store.occurrences {
        for span in &record.sog {
            total += 1;
            let (Some(a), Some(b)) = (words.position(&span.start), words.position(&span.stop))
            else {
                diag.warn(&format!(
                    "{occurrence_id}: span {}..{} references unknown word ids",
                    span.start, span.stop
                ));
                continue;
            };
            // spans may be authored in either direction; normalize only for
            // the interval comparison
            flat.push(FlatSpan {
                lo: a.min(b),
                hi: a.max(b),
                concept_id: record.concept_id,
            });
        }
    }
    (total, flat)
}

/// All-pairs overlap agreement between the two stores' grounding spans.
pub fn span_overlap(
    reference: &AnnotationStore,
    target: &AnnotationStore,
    words: &WordSequence,
    diag: &dyn Diagnostics,
) -> SpanOverlapReport {
    let (reference_total, reference_spans) = flatten(reference, words, diag);
    let (target_total, target_spans) = flatten(target, words, diag);

    let mut report = SpanOverlapReport {
        reference_total,
        target_total,
        ..Default::default()
    };
    for r in &reference_spans {
        for t in &target_spans {
            if r.overlaps(t) {
                if r.concept_id == t.concept_id {
                    report.positive += 1;
                } else {
                    report.negative += 1;
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_overlap_includes_shared_endpoints() {
        let a = FlatSpan { lo: 1, hi: 3, concept_id: None };
        let b = FlatSpan { lo: 3, hi: 5, concept_id: None };
        let c = FlatSpan { lo: 1, hi: 2, concept_id: None };
        let d = FlatSpan { lo: 3, hi: 5, concept_id: None };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!c.overlaps(&d));
        assert!(!d.overlaps(&c));
    }
}

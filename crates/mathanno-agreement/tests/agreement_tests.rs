//! Engine-level agreement tests over small synthetic papers.

use mathanno_agreement::{compare, span::span_overlap};
use mathanno_index::words::WordSequence;
use mathanno_index::DocumentIndex;
use mathanno_model::{
    Affix, AnnotationStore, CollectingDiagnostics, ConceptDictionary, IdentifierHex, IdfVariant,
    MathConcept, SilentDiagnostics,
};

const PAPER: &str = r#"<html><body>
    <p id="S1.p1">
        <span class="gd_word" id="w1">the</span>
        <span class="gd_word" id="w2">learning</span>
        <span class="gd_word" id="w3">rate</span>
        <span class="gd_word" id="w4">of</span>
        <span class="gd_word" id="w5">training</span>
        <math><mi id="o1">x</mi></math>
        <math><mi id="o2">α</mi></math>
    </p>
</body></html>"#;

fn dictionary() -> ConceptDictionary {
    let mut dictionary = ConceptDictionary::new("gold");
    let x = IdentifierHex::from_text("x");
    dictionary.append_concept(&x, &IdfVariant::Default, MathConcept::new("a variable", 0, vec![]));
    let alpha = IdentifierHex::from_text("α");
    dictionary.append_concept(
        &alpha,
        &IdfVariant::Default,
        MathConcept::new("the learning rate", 0, vec![]),
    );
    dictionary.append_concept(
        &alpha,
        &IdfVariant::Default,
        MathConcept::new("an index", 0, vec![Affix::Subscript]),
    );
    dictionary.append_concept(
        &alpha,
        &IdfVariant::Default,
        MathConcept::new("a coefficient", 0, vec![Affix::Subscript]),
    );
    dictionary
}

fn stores(reference_o2: usize, target_o2: usize) -> (AnnotationStore, AnnotationStore) {
    let ids = ["o1".to_string(), "o2".to_string()];
    let mut reference = AnnotationStore::with_occurrences("gold", ids.clone());
    reference.assign("o1", 0).unwrap();
    reference.assign("o2", reference_o2).unwrap();
    let mut target = AnnotationStore::with_occurrences("second", ids);
    target.assign("o1", 0).unwrap();
    target.assign("o2", target_o2).unwrap();
    (reference, target)
}

#[test]
fn perfect_agreement() {
    let (reference, target) = stores(1, 1);
    let index = DocumentIndex::build(PAPER);
    let report = compare(&reference, &dictionary(), &target, &index, &SilentDiagnostics);

    assert_eq!(report.positive, 2);
    assert_eq!(report.negative, 0);
    assert_eq!(report.agreement_rate(), Some(1.0));
    assert_eq!(report.pattern_mismatch_rate(), None);
    assert!(report.mismatches.is_empty());
}

#[test]
fn pattern_agreement_on_disagreeing_concepts() {
    // Reference picks concept 1, target picks concept 2; both carry the
    // subscript affix pattern.
    let (reference, target) = stores(1, 2);
    let index = DocumentIndex::build(PAPER);
    let report = compare(&reference, &dictionary(), &target, &index, &SilentDiagnostics);

    assert_eq!(report.positive, 1);
    assert_eq!(report.negative, 1);
    assert_eq!(report.pattern_agreed, 1);
    assert_eq!(report.pattern_mismatch, 0);
    assert_eq!(report.agreement_rate(), Some(0.5));
    assert_eq!(report.pattern_mismatch_rate(), Some(0.0));

    let mismatch = &report.mismatches[0];
    assert_eq!(mismatch.occurrence_id, "o2");
    assert_eq!(mismatch.reference_concept, 1);
    assert_eq!(mismatch.target_concept, 2);
    assert!(mismatch.pattern_agreed);
}

#[test]
fn pattern_mismatch_when_affixes_differ() {
    // Concept 0 has no affixes, concept 1 has a subscript.
    let (reference, target) = stores(0, 1);
    let index = DocumentIndex::build(PAPER);
    let report = compare(&reference, &dictionary(), &target, &index, &SilentDiagnostics);

    assert_eq!(report.pattern_mismatch, 1);
    assert_eq!(report.pattern_mismatch_rate(), Some(1.0));
    assert!(!report.mismatches[0].pattern_agreed);
}

#[test]
fn unannotated_target_occurrences_are_excluded() {
    let (reference, mut target) = stores(1, 1);
    target.unassign("o2").unwrap();
    let index = DocumentIndex::build(PAPER);
    let diag = CollectingDiagnostics::new();
    let report = compare(&reference, &dictionary(), &target, &index, &diag);

    assert_eq!(report.unannotated, 1);
    assert_eq!(report.total(), 1);
    assert_eq!(report.agreement_rate(), Some(1.0));
    assert!(diag.warnings().iter().any(|w| w.contains("unannotated")));
}

#[test]
fn per_identifier_kappa_groups() {
    let (reference, target) = stores(1, 2);
    let index = DocumentIndex::build(PAPER);
    let report = compare(&reference, &dictionary(), &target, &index, &SilentDiagnostics);

    assert_eq!(report.per_identifier.len(), 2);
    for group in &report.per_identifier {
        assert_eq!(group.count, 1);
        // single-pair pools have no variance either way
        assert_eq!(group.kappa, None);
    }
    assert_eq!(report.weighted_kappa, None);
}

#[test]
fn span_overlap_counts_all_pairs() {
    let ids = ["o1".to_string(), "o2".to_string()];
    let mut reference = AnnotationStore::with_occurrences("gold", ids.clone());
    reference.assign("o1", 0).unwrap();
    reference.add_span("o1", "w1", "w3", 0).unwrap();
    let mut target = AnnotationStore::with_occurrences("second", ids);
    target.assign("o1", 0).unwrap();
    target.add_span("o1", "w3", "w5", 0).unwrap();
    target.add_span("o1", "w2", "w3", 0).unwrap();

    let words = WordSequence::from_html(PAPER);
    let report = span_overlap(&reference, &target, &words, &SilentDiagnostics);

    assert_eq!(report.reference_total, 1);
    assert_eq!(report.target_total, 2);
    // [w1,w3] overlaps both [w3,w5] (shared endpoint) and [w2,w3]
    assert_eq!(report.positive, 2);
    assert_eq!(report.negative, 0);
}

#[test]
fn span_overlap_disjoint_and_conflicting() {
    let ids = ["o1".to_string(), "o2".to_string()];
    let mut reference = AnnotationStore::with_occurrences("gold", ids.clone());
    reference.assign("o1", 0).unwrap();
    reference.add_span("o1", "w1", "w2", 0).unwrap();
    let mut target = AnnotationStore::with_occurrences("second", ids);
    target.assign("o2", 1).unwrap();
    target.add_span("o2", "w2", "w4", 0).unwrap();
    target.add_span("o2", "w4", "w5", 0).unwrap();

    let words = WordSequence::from_html(PAPER);
    let report = span_overlap(&reference, &target, &words, &SilentDiagnostics);

    // [w1,w2] overlaps [w2,w4] but with different concept ids; [w4,w5] is
    // disjoint from it
    assert_eq!(report.positive, 0);
    assert_eq!(report.negative, 1);
}

#[test]
fn reversed_spans_still_participate() {
    let ids = ["o1".to_string()];
    let mut reference = AnnotationStore::with_occurrences("gold", ids.clone());
    reference.assign("o1", 0).unwrap();
    reference.add_span("o1", "w3", "w1", 0).unwrap();
    let mut target = AnnotationStore::with_occurrences("second", ids);
    target.assign("o1", 0).unwrap();
    target.add_span("o1", "w2", "w4", 0).unwrap();

    let words = WordSequence::from_html(PAPER);
    let report = span_overlap(&reference, &target, &words, &SilentDiagnostics);
    assert_eq!(report.positive, 1);
}

#[test]
fn unknown_word_ids_are_skipped_with_a_warning() {
    let ids = ["o1".to_string()];
    let mut reference = AnnotationStore::with_occurrences("gold", ids.clone());
    reference.add_span("o1", "w1", "w999", 0).unwrap();
    let target = AnnotationStore::with_occurrences("second", ids);

    let words = WordSequence::from_html(PAPER);
    let diag = CollectingDiagnostics::new();
    let report = span_overlap(&reference, &target, &words, &diag);

    assert_eq!(report.reference_total, 1);
    assert_eq!(report.positive + report.negative, 0);
    assert_eq!(diag.warnings().len(), 1);
}

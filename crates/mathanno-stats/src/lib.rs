//! Descriptive statistics over annotation data
//!
//! Pure aggregation over a concept dictionary and an annotation store.
//! Everything here returns plain scalars and small structs; rendering them
//! as charts or tables is someone else's job. Degenerate inputs (empty
//! dictionaries, zero occurrences) produce `None`, never a division error.

use mathanno_index::DocumentIndex;
use mathanno_model::{AnnotationStore, ConceptDictionary, IdfVariant, IdentifierHex};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Distributions
// ============================================================================

/// Summary of a sample of counts. Variance is the population variance, to
/// match the established reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl Distribution {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Distribution {
            max,
            median,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    pub fn from_counts(counts: impl IntoIterator<Item = usize>) -> Option<Self> {
        let values: Vec<f64> = counts.into_iter().map(|c| c as f64).collect();
        Self::from_values(&values)
    }
}

// ============================================================================
// Dictionary statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryStats {
    /// Distinct identifier hexes.
    pub identifier_types: usize,
    /// (hex, variant) entries.
    pub entries: usize,
    /// Total concepts across all entries.
    pub concepts: usize,
    /// Entries holding more than one concept.
    pub entries_with_multiple: usize,
    /// Distribution of concept-list lengths; `None` for an empty dictionary.
    pub concepts_per_entry: Option<Distribution>,
}

pub fn dictionary_stats(dictionary: &ConceptDictionary) -> DictionaryStats {
    let lengths: Vec<usize> = dictionary
        .iter_lists()
        .map(|(_, _, list)| list.len())
        .collect();
    DictionaryStats {
        identifier_types: dictionary.concepts.len(),
        entries: lengths.len(),
        concepts: lengths.iter().sum(),
        entries_with_multiple: lengths.iter().filter(|len| **len > 1).count(),
        concepts_per_entry: Distribution::from_counts(lengths.iter().copied()),
    }
}

// ============================================================================
// Annotation statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStats {
    pub occurrences: usize,
    pub annotated: usize,
    /// annotated / occurrences; `None` for an empty store.
    pub progress_rate: Option<f64>,
    /// Mean number of candidate concepts available per occurrence.
    pub average_candidates: Option<f64>,
    /// Total grounding spans across the store.
    pub sog_count: usize,
    /// Concepts in the dictionary that no occurrence is assigned to.
    pub orphaned_concepts: usize,
}

/// Aggregate annotation progress. Occurrences that do not resolve in the
/// index contribute to the totals but not to the candidate average.
pub fn annotation_stats(
    store: &AnnotationStore,
    dictionary: &ConceptDictionary,
    index: &DocumentIndex,
) -> AnnotationStats {
    let occurrences = store.len();
    let annotated = store.annotated_count();

    let mut candidate_sum = 0usize;
    let mut assigned: HashMap<(&IdentifierHex, &IdfVariant), HashSet<usize>> = HashMap::new();
    for (occurrence_id, record) in &store.occurrences {
        let Some(key) = index.key(occurrence_id) else {
            continue;
        };
        if let Some(list) = dictionary.concept_list(&key.hex, &key.variant) {
            candidate_sum += list.len();
        }
        if let Some(concept_id) = record.concept_id {
            assigned
                .entry((&key.hex, &key.variant))
                .or_default()
                .insert(concept_id);
        }
    }

    let used: usize = assigned.values().map(HashSet::len).sum();
    let total_concepts: usize = dictionary.iter_lists().map(|(_, _, list)| list.len()).sum();

    AnnotationStats {
        occurrences,
        annotated,
        progress_rate: (occurrences > 0).then(|| annotated as f64 / occurrences as f64),
        average_candidates: (occurrences > 0).then(|| candidate_sum as f64 / occurrences as f64),
        sog_count: store.sog_count(),
        orphaned_concepts: total_concepts.saturating_sub(used),
    }
}

/// Distribution of grounding-span counts per concept, zero-filled for
/// concepts never assigned. `None` for an empty dictionary.
pub fn sog_length_stats(
    store: &AnnotationStore,
    dictionary: &ConceptDictionary,
    index: &DocumentIndex,
) -> Option<Distribution> {
    let mut counts: HashMap<(&IdentifierHex, &IdfVariant, usize), usize> = HashMap::new();
    for (hex, variant, list) in dictionary.iter_lists() {
        for concept_id in 0..list.len() {
            counts.insert((hex, variant, concept_id), 0);
        }
    }

    for (occurrence_id, record) in &store.occurrences {
        let Some(concept_id) = record.concept_id else {
            continue;
        };
        let Some(key) = index.key(occurrence_id) else {
            continue;
        };
        if let Some(count) = counts.get_mut(&(&key.hex, &key.variant, concept_id)) {
            *count += record.sog.len();
        }
    }

    Distribution::from_counts(counts.into_values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mathanno_model::MathConcept;

    const PAPER: &str = r#"<html><body>
        <math><mi id="o1">x</mi></math>
        <math><mi id="o2">x</mi></math>
        <math><mi id="o3">α</mi></math>
    </body></html>"#;

    fn fixtures() -> (AnnotationStore, ConceptDictionary, DocumentIndex) {
        let index = DocumentIndex::build(PAPER);
        let mut dictionary = ConceptDictionary::new("gold");
        let x = IdentifierHex::from_text("x");
        dictionary.append_concept(&x, &IdfVariant::Default, MathConcept::new("a", 0, vec![]));
        dictionary.append_concept(&x, &IdfVariant::Default, MathConcept::new("b", 0, vec![]));
        let alpha = IdentifierHex::from_text("α");
        dictionary.append_concept(&alpha, &IdfVariant::Default, MathConcept::new("c", 0, vec![]));

        let mut store = AnnotationStore::with_occurrences(
            "gold",
            ["o1".to_string(), "o2".to_string(), "o3".to_string()],
        );
        store.assign("o1", 0).unwrap();
        store.assign("o2", 0).unwrap();
        store.add_span("o1", "w1", "w2", 0).unwrap();
        store.add_span("o1", "w4", "w5", 0).unwrap();
        (store, dictionary, index)
    }

    #[test]
    fn distribution_basics() {
        let dist = Distribution::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(dist.max, 4.0);
        assert_relative_eq!(dist.median, 2.5);
        assert_relative_eq!(dist.mean, 2.5);
        assert_relative_eq!(dist.variance, 1.25);
        assert_relative_eq!(dist.std_dev, 1.25f64.sqrt());
        assert_eq!(Distribution::from_values(&[]), None);
    }

    #[test]
    fn odd_length_median_is_middle_value() {
        let dist = Distribution::from_values(&[5.0, 1.0, 3.0]).unwrap();
        assert_relative_eq!(dist.median, 3.0);
    }

    #[test]
    fn dictionary_aggregates() {
        let (_, dictionary, _) = fixtures();
        let stats = dictionary_stats(&dictionary);
        assert_eq!(stats.identifier_types, 2);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.concepts, 3);
        assert_eq!(stats.entries_with_multiple, 1);
        let dist = stats.concepts_per_entry.unwrap();
        assert_relative_eq!(dist.max, 2.0);
        assert_relative_eq!(dist.mean, 1.5);
    }

    #[test]
    fn annotation_aggregates() {
        let (store, dictionary, index) = fixtures();
        let stats = annotation_stats(&store, &dictionary, &index);
        assert_eq!(stats.occurrences, 3);
        assert_eq!(stats.annotated, 2);
        assert_relative_eq!(stats.progress_rate.unwrap(), 2.0 / 3.0);
        // o1 and o2 see 2 candidates each, o3 sees 1
        assert_relative_eq!(stats.average_candidates.unwrap(), 5.0 / 3.0);
        assert_eq!(stats.sog_count, 2);
        // concepts x/1 and α/0 are never assigned
        assert_eq!(stats.orphaned_concepts, 2);
    }

    #[test]
    fn empty_store_has_undefined_rates() {
        let (_, dictionary, index) = fixtures();
        let store = AnnotationStore::new("gold");
        let stats = annotation_stats(&store, &dictionary, &index);
        assert_eq!(stats.progress_rate, None);
        assert_eq!(stats.average_candidates, None);
    }

    #[test]
    fn sog_counts_are_zero_filled_per_concept() {
        let (store, dictionary, index) = fixtures();
        let dist = sog_length_stats(&store, &dictionary, &index).unwrap();
        // three concepts: x/0 carries 2 spans, the others 0
        assert_relative_eq!(dist.max, 2.0);
        assert_relative_eq!(dist.mean, 2.0 / 3.0);
        assert_relative_eq!(dist.median, 0.0);
    }
}

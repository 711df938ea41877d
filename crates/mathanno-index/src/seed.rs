//! Fresh data files for a newly preprocessed paper.
//!
//! The preprocessing step creates one annotation store (every resolvable
//! occurrence unannotated) and one dictionary (every observed identifier
//! with an empty concept list) per paper. Non-identifier occurrences are
//! left out of both.

use crate::DocumentIndex;
use mathanno_model::{AnnotationStore, ConceptDictionary};

/// A fully-unannotated store covering every resolvable occurrence.
pub fn initial_annotation(index: &DocumentIndex, annotator: &str) -> AnnotationStore {
    AnnotationStore::with_occurrences(
        annotator,
        index.resolved().map(|(id, _)| id.to_string()),
    )
}

/// A dictionary with an empty concept list for every observed identifier
/// key, surface text decoded from the hex.
pub fn initial_dictionary(index: &DocumentIndex, author: &str) -> ConceptDictionary {
    let mut dictionary = ConceptDictionary::new(author);
    for (_, key) in index.resolved() {
        dictionary.insert_identifier(&key.hex, &key.variant);
    }
    dictionary
}

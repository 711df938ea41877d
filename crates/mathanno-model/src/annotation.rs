//! The annotation store.
//!
//! One store per paper per annotator: occurrence id → assigned concept +
//! grounding spans (SoG). Mutations mirror the editing operations of the
//! annotation front end; each one is followed by a full save of the backing
//! file, so the store assumes a single writer at a time.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ANNO_VERSION: &str = "1.0";

/// Document-scoped occurrence id, assigned by the preprocessing step.
pub type OccurrenceId = String;

/// Id of a word token in the paper's ordered word sequence.
pub type WordId = String;

fn unknown() -> String {
    "unknown".to_string()
}

/// A contiguous run of word tokens cited as textual evidence (source of
/// grounding) for a concept assignment.
///
/// Whether `start` precedes `stop` in document order is not validated;
/// spans authored in either direction are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SogSpan {
    pub start: WordId,
    pub stop: WordId,
    #[serde(rename = "type")]
    pub kind: u32,
}

impl SogSpan {
    pub fn new(start: impl Into<WordId>, stop: impl Into<WordId>, kind: u32) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            kind,
        }
    }

    fn matches(&self, start: &str, stop: &str) -> bool {
        self.start == start && self.stop == stop
    }
}

/// Annotation state of a single occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceAnnotation {
    /// Positional index into the concept list for this occurrence's
    /// identifier key; `None` = unannotated. Not validated against the
    /// dictionary here — that is the caller's responsibility.
    pub concept_id: Option<usize>,
    pub sog: Vec<SogSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationStore {
    #[serde(rename = "_anno_version", default = "unknown")]
    pub version: String,
    #[serde(rename = "_annotator", default = "unknown")]
    pub annotator: String,
    #[serde(rename = "mi_anno")]
    pub occurrences: BTreeMap<OccurrenceId, OccurrenceAnnotation>,
}

impl AnnotationStore {
    pub fn new(annotator: impl Into<String>) -> Self {
        Self {
            version: ANNO_VERSION.to_string(),
            annotator: annotator.into(),
            occurrences: BTreeMap::new(),
        }
    }

    /// A fresh, fully-unannotated store covering the given occurrence ids.
    pub fn with_occurrences(
        annotator: impl Into<String>,
        ids: impl IntoIterator<Item = OccurrenceId>,
    ) -> Self {
        let mut store = Self::new(annotator);
        for id in ids {
            store.occurrences.insert(id, OccurrenceAnnotation::default());
        }
        store
    }

    pub fn get(&self, occurrence_id: &str) -> Option<&OccurrenceAnnotation> {
        self.occurrences.get(occurrence_id)
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn annotated_count(&self) -> usize {
        self.occurrences
            .values()
            .filter(|anno| anno.concept_id.is_some())
            .count()
    }

    pub fn sog_count(&self) -> usize {
        self.occurrences.values().map(|anno| anno.sog.len()).sum()
    }

    fn record_mut(&mut self, occurrence_id: &str) -> Result<&mut OccurrenceAnnotation, DataError> {
        self.occurrences
            .get_mut(occurrence_id)
            .ok_or_else(|| DataError::NotFound(format!("occurrence {occurrence_id}")))
    }

    /// Set the record's concept id. Dictionary validation is deliberately
    /// left to the caller.
    pub fn assign(&mut self, occurrence_id: &str, concept_id: usize) -> Result<(), DataError> {
        self.record_mut(occurrence_id)?.concept_id = Some(concept_id);
        Ok(())
    }

    pub fn unassign(&mut self, occurrence_id: &str) -> Result<(), DataError> {
        self.record_mut(occurrence_id)?.concept_id = None;
        Ok(())
    }

    /// Append a grounding span. Idempotent on `(start, stop)`: returns
    /// `false` without appending when an identical pair already exists.
    pub fn add_span(
        &mut self,
        occurrence_id: &str,
        start: impl Into<WordId>,
        stop: impl Into<WordId>,
        kind: u32,
    ) -> Result<bool, DataError> {
        let record = self.record_mut(occurrence_id)?;
        let (start, stop) = (start.into(), stop.into());
        if record.sog.iter().any(|s| s.matches(&start, &stop)) {
            return Ok(false);
        }
        record.sog.push(SogSpan { start, stop, kind });
        Ok(true)
    }

    /// Remove the first span matching `(start, stop)`. Returns `false`
    /// (not an error) when none matches.
    pub fn remove_span(
        &mut self,
        occurrence_id: &str,
        start: &str,
        stop: &str,
    ) -> Result<bool, DataError> {
        let record = self.record_mut(occurrence_id)?;
        match record.sog.iter().position(|s| s.matches(start, stop)) {
            Some(idx) => {
                record.sog.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Update the type tag on the first span matching `(start, stop)`.
    /// Returns `false` when none matches.
    pub fn retag_span(
        &mut self,
        occurrence_id: &str,
        start: &str,
        stop: &str,
        new_kind: u32,
    ) -> Result<bool, DataError> {
        let record = self.record_mut(occurrence_id)?;
        match record.sog.iter_mut().find(|s| s.matches(start, stop)) {
            Some(span) => {
                span.kind = new_kind;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AnnotationStore {
        AnnotationStore::with_occurrences("tester", ["mi1".to_string(), "mi2".to_string()])
    }

    #[test]
    fn fresh_store_is_unannotated() {
        let store = store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.annotated_count(), 0);
        assert_eq!(store.get("mi1").unwrap().concept_id, None);
    }

    #[test]
    fn assign_and_unassign() {
        let mut store = store();
        store.assign("mi1", 2).unwrap();
        assert_eq!(store.get("mi1").unwrap().concept_id, Some(2));
        store.unassign("mi1").unwrap();
        assert_eq!(store.get("mi1").unwrap().concept_id, None);
    }

    #[test]
    fn unknown_occurrence_is_not_found() {
        let mut store = store();
        assert!(matches!(
            store.assign("mi9", 0).unwrap_err(),
            DataError::NotFound(_)
        ));
    }

    #[test]
    fn add_span_is_idempotent() {
        let mut store = store();
        assert!(store.add_span("mi1", "w1", "w3", 0).unwrap());
        assert!(!store.add_span("mi1", "w1", "w3", 0).unwrap());
        assert_eq!(store.get("mi1").unwrap().sog.len(), 1);
    }

    #[test]
    fn remove_span_twice_is_a_noop() {
        let mut store = store();
        store.add_span("mi1", "w1", "w3", 0).unwrap();
        assert!(store.remove_span("mi1", "w1", "w3").unwrap());
        assert!(!store.remove_span("mi1", "w1", "w3").unwrap());
        assert!(store.get("mi1").unwrap().sog.is_empty());
    }

    #[test]
    fn remove_span_takes_first_match_only() {
        let mut store = store();
        store.add_span("mi1", "w1", "w3", 0).unwrap();
        store.add_span("mi1", "w4", "w6", 1).unwrap();
        store.remove_span("mi1", "w1", "w3").unwrap();
        let sog = &store.get("mi1").unwrap().sog;
        assert_eq!(sog.len(), 1);
        assert_eq!(sog[0].start, "w4");
    }

    #[test]
    fn retag_span_updates_type() {
        let mut store = store();
        store.add_span("mi1", "w1", "w3", 0).unwrap();
        assert!(store.retag_span("mi1", "w1", "w3", 2).unwrap());
        assert_eq!(store.get("mi1").unwrap().sog[0].kind, 2);
        assert!(!store.retag_span("mi1", "w7", "w9", 2).unwrap());
    }

    #[test]
    fn reversed_spans_are_kept_as_authored() {
        let mut store = store();
        store.add_span("mi1", "w5", "w2", 0).unwrap();
        let span = &store.get("mi1").unwrap().sog[0];
        assert_eq!((span.start.as_str(), span.stop.as_str()), ("w5", "w2"));
    }
}

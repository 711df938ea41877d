//! Document index for annotated papers.
//!
//! The input is a preprocessed paper: HTML with embedded MathML where every
//! `<mi>` element carries a document-scoped `id` and every paragraph word is
//! wrapped in `<span class="gd_word" id=...>`. This crate walks that markup
//! once (read-only, producing fresh structures) and exposes:
//!
//! - [`DocumentIndex`]: occurrence id → identifier key, with non-identifier
//!   glyphs (ellipses, QED box) recorded as present-but-unresolvable,
//! - [`words::WordSequence`]: the ordered word tokens used to resolve
//!   grounding spans to positions and text,
//! - [`seed`]: fresh annotation store / dictionary construction for a newly
//!   preprocessed paper.

pub mod seed;
pub mod words;

use mathanno_model::{IdentifierHex, IdentifierKey, IdfVariant, OccurrenceId};
use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Hex codes of glyphs that render inside `<mi>` but are not identifiers.
pub const NON_IDENTIFIER_HEXES: [&str; 5] = [
    "e280a6", // HORIZONTAL ELLIPSIS (…)
    "e28baf", // MIDLINE HORIZONTAL ELLIPSIS (⋯)
    "e28bae", // VERTICAL ELLIPSIS (⋮)
    "e28bb1", // DOWN RIGHT DIAGONAL ELLIPSIS (⋱)
    "e296a1", // QED BOX (□)
];

/// Mapping from occurrence id to identifier key.
///
/// `Some(None)` entries are occurrences whose text is a non-identifier
/// glyph: present in the document but deliberately unresolvable, so callers
/// can tell "not an identifier" apart from "not indexed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    entries: BTreeMap<OccurrenceId, Option<IdentifierKey>>,
}

impl DocumentIndex {
    /// Build the index in a single pass over every `<mi>` element in
    /// document order. Elements without an `id` or with empty text are not
    /// indexed at all.
    pub fn build(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mi = Selector::parse("mi").unwrap();

        let mut entries = BTreeMap::new();
        for element in document.select(&mi) {
            let Some(id) = element.value().attr("id") else {
                continue;
            };
            let text: String = element.text().collect();
            if text.is_empty() {
                continue;
            }

            let hex = IdentifierHex::from_text(&text);
            let key = if NON_IDENTIFIER_HEXES.contains(&hex.as_str()) {
                None
            } else {
                let variant = IdfVariant::from_attr(element.value().attr("mathvariant"));
                Some(IdentifierKey::new(hex, variant))
            };
            entries.insert(id.to_string(), key);
        }

        DocumentIndex { entries }
    }

    /// Full lookup: outer `None` = not indexed, inner `None` = indexed but
    /// a non-identifier glyph.
    pub fn entry(&self, occurrence_id: &str) -> Option<Option<&IdentifierKey>> {
        self.entries.get(occurrence_id).map(Option::as_ref)
    }

    /// The identifier key of a resolvable occurrence.
    pub fn key(&self, occurrence_id: &str) -> Option<&IdentifierKey> {
        self.entries.get(occurrence_id).and_then(Option::as_ref)
    }

    pub fn contains(&self, occurrence_id: &str) -> bool {
        self.entries.contains_key(occurrence_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&IdentifierKey>)> {
        self.entries
            .iter()
            .map(|(id, key)| (id.as_str(), key.as_ref()))
    }

    /// Occurrences that resolve to an identifier key.
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &IdentifierKey)> {
        self.entries
            .iter()
            .filter_map(|(id, key)| key.as_ref().map(|k| (id.as_str(), k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><body>
        <p id="S1.p1">Let
        <math><mi id="S1.p1.1.m1" mathvariant="normal">x</mi></math> and
        <math><mi id="S1.p1.1.m2">y</mi></math> with
        <math><mi id="S1.p1.1.m3">…</mi></math> and
        <math><mi id="S1.p1.1.m4"></mi></math> and
        <math><mi>z</mi></math>
        </p>
    </body></html>"#;

    #[test]
    fn indexes_identifiers_with_variants() {
        let index = DocumentIndex::build(SAMPLE);
        let key = index.key("S1.p1.1.m1").unwrap();
        assert_eq!(key.hex.as_str(), "78");
        assert_eq!(key.variant, IdfVariant::Roman);

        let key = index.key("S1.p1.1.m2").unwrap();
        assert_eq!(key.hex.as_str(), "79");
        assert_eq!(key.variant, IdfVariant::Default);
    }

    #[test]
    fn non_identifier_glyphs_are_present_but_unresolvable() {
        let index = DocumentIndex::build(SAMPLE);
        assert_eq!(index.entry("S1.p1.1.m3"), Some(None));
        assert!(index.contains("S1.p1.1.m3"));
        assert_eq!(index.key("S1.p1.1.m3"), None);
    }

    #[test]
    fn empty_or_anonymous_elements_are_not_indexed() {
        let index = DocumentIndex::build(SAMPLE);
        assert_eq!(index.entry("S1.p1.1.m4"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn non_empty_non_special_occurrences_never_map_to_none() {
        let index = DocumentIndex::build(SAMPLE);
        for (_, key) in index.iter() {
            if let Some(key) = key {
                assert!(!NON_IDENTIFIER_HEXES.contains(&key.hex.as_str()));
            }
        }
    }

    #[test]
    fn all_non_identifier_glyphs_map_to_none() {
        let html = r#"<html><body>
            <math><mi id="m1">⋯</mi></math>
            <math><mi id="m2">⋮</mi></math>
            <math><mi id="m3">⋱</mi></math>
            <math><mi id="m4">□</mi></math>
        </body></html>"#;
        let index = DocumentIndex::build(html);
        for id in ["m1", "m2", "m3", "m4"] {
            assert_eq!(index.entry(id), Some(None), "{id}");
        }
    }
}

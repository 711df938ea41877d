//! The math concept dictionary.
//!
//! Maps identifier hex → surface metadata + per-variant *ordered* concept
//! lists. The list index is the `concept_id` stored in annotation records,
//! so all access goes through typed accessors that keep the positional
//! invariant enforceable: lists are appended to or replaced in place, never
//! reordered.

use crate::concept::{MathConcept, Surface};
use crate::error::DataError;
use crate::identifier::{IdentifierHex, IdfVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MCDICT_VERSION: &str = "1.0";

fn unknown() -> String {
    "unknown".to_string()
}

/// Dictionary entry for one identifier hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    #[serde(rename = "_surface")]
    pub surface: Surface,
    pub identifiers: BTreeMap<IdfVariant, Vec<MathConcept>>,
}

impl DictEntry {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            identifiers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDictionary {
    #[serde(rename = "_mcdict_version", default = "unknown")]
    pub version: String,
    #[serde(rename = "_author", default = "unknown")]
    pub author: String,
    pub concepts: BTreeMap<IdentifierHex, DictEntry>,
}

impl ConceptDictionary {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            version: MCDICT_VERSION.to_string(),
            author: author.into(),
            concepts: BTreeMap::new(),
        }
    }

    pub fn entry(&self, hex: &IdentifierHex) -> Option<&DictEntry> {
        self.concepts.get(hex)
    }

    /// The ordered concept list for an identifier+variant, if known.
    pub fn concept_list(&self, hex: &IdentifierHex, variant: &IdfVariant) -> Option<&[MathConcept]> {
        self.concepts
            .get(hex)
            .and_then(|entry| entry.identifiers.get(variant))
            .map(Vec::as_slice)
    }

    /// Resolve a positional concept id.
    pub fn lookup(
        &self,
        hex: &IdentifierHex,
        variant: &IdfVariant,
        concept_id: usize,
    ) -> Result<&MathConcept, DataError> {
        let list = self
            .concept_list(hex, variant)
            .ok_or_else(|| DataError::NotFound(format!("identifier {hex}/{variant}")))?;
        list.get(concept_id).ok_or_else(|| DataError::IndexOutOfRange {
            hex: hex.to_string(),
            variant: variant.to_string(),
            concept_id,
            len: list.len(),
        })
    }

    /// Register an identifier+variant with an empty concept list, creating
    /// the surface metadata from the hex when the entry is new.
    pub fn insert_identifier(&mut self, hex: &IdentifierHex, variant: &IdfVariant) {
        let entry = self.concepts.entry(hex.clone()).or_insert_with(|| {
            DictEntry::new(Surface::new(hex.decode_text().unwrap_or_default()))
        });
        entry.identifiers.entry(variant.clone()).or_default();
    }

    /// Append a concept to the end of the list; the new concept id is the
    /// old list length. Creates the entry path when missing.
    pub fn append_concept(
        &mut self,
        hex: &IdentifierHex,
        variant: &IdfVariant,
        concept: MathConcept,
    ) -> usize {
        let entry = self.concepts.entry(hex.clone()).or_insert_with(|| {
            DictEntry::new(Surface::new(hex.decode_text().unwrap_or_default()))
        });
        let list = entry.identifiers.entry(variant.clone()).or_default();
        list.push(concept);
        list.len() - 1
    }

    /// Replace the concept at an existing position in place.
    pub fn replace_concept(
        &mut self,
        hex: &IdentifierHex,
        variant: &IdfVariant,
        concept_id: usize,
        concept: MathConcept,
    ) -> Result<(), DataError> {
        let list = self
            .concepts
            .get_mut(hex)
            .and_then(|entry| entry.identifiers.get_mut(variant))
            .ok_or_else(|| DataError::NotFound(format!("identifier {hex}/{variant}")))?;
        let len = list.len();
        let slot = list.get_mut(concept_id).ok_or(DataError::IndexOutOfRange {
            hex: hex.to_string(),
            variant: variant.to_string(),
            concept_id,
            len,
        })?;
        *slot = concept;
        Ok(())
    }

    /// All (hex, variant, concept list) triples in key order.
    pub fn iter_lists(
        &self,
    ) -> impl Iterator<Item = (&IdentifierHex, &IdfVariant, &[MathConcept])> {
        self.concepts.iter().flat_map(|(hex, entry)| {
            entry
                .identifiers
                .iter()
                .map(move |(variant, list)| (hex, variant, list.as_slice()))
        })
    }
}

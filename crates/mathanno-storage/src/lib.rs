//! Persistence for annotation data
//!
//! One annotation store file and one concept dictionary file per paper
//! (`<id>_anno.json`, `<id>_mcdict.json`). Every mutation in the editing
//! front end is a full read-modify-write of the backing file; nothing here
//! locks, so callers embedding this behind a concurrent front end must
//! serialize mutating operations per store file themselves.
//!
//! Load contract:
//! - missing required structure → [`DataError::MalformedInput`], fatal for
//!   that file,
//! - an unexpected schema-version tag → a warning through the injected
//!   [`Diagnostics`], never an abort; metadata defaults to `"unknown"`.
//!
//! Saved output is canonical (see [`canonical`]) so that revisions of the
//! same store diff cleanly under version control.

pub mod canonical;
pub mod migrate;


use mathanno_model::annotation::ANNO_VERSION;
use mathanno_model::dictionary::MCDICT_VERSION;
use mathanno_model::{AnnotationStore, ConceptDictionary, DataError, Diagnostics};
use std::path::Path;

// ============================================================================
// Byte-level load/save
// ============================================================================

pub fn load_annotation(
    bytes: &[u8],
    diag: &dyn Diagnostics,
) -> Result<AnnotationStore, DataError> {
    let store: AnnotationStore = serde_json::from_slice(bytes)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;
    if store.version != ANNO_VERSION {
        diag.warn(&format!(
            "annotation data version {:?} is incompatible (expected {ANNO_VERSION})",
            store.version
        ));
    }
    Ok(store)
}

pub fn save_annotation(store: &AnnotationStore) -> Result<Vec<u8>, DataError> {
    canonical::to_canonical_json(store)
}

pub fn load_dictionary(
    bytes: &[u8],
    diag: &dyn Diagnostics,
) -> Result<ConceptDictionary, DataError> {
    let dictionary: ConceptDictionary = serde_json::from_slice(bytes)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;
    if dictionary.version != MCDICT_VERSION {
        diag.warn(&format!(
            "math concept dict version {:?} is incompatible (expected {MCDICT_VERSION})",
            dictionary.version
        ));
    }
    Ok(dictionary)
}

pub fn save_dictionary(dictionary: &ConceptDictionary) -> Result<Vec<u8>, DataError> {
    canonical::to_canonical_json(dictionary)
}

// ============================================================================
// File-level wrappers
// ============================================================================

pub fn read_annotation(path: &Path, diag: &dyn Diagnostics) -> anyhow::Result<AnnotationStore> {
    let bytes = std::fs::read(path)
        .map_err(|err| anyhow::anyhow!("reading {}: {err}", path.display()))?;
    load_annotation(&bytes, diag).map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))
}

pub fn write_annotation(path: &Path, store: &AnnotationStore) -> anyhow::Result<()> {
    let bytes = save_annotation(store)?;
    std::fs::write(path, bytes)
        .map_err(|err| anyhow::anyhow!("writing {}: {err}", path.display()))
}

pub fn read_dictionary(path: &Path, diag: &dyn Diagnostics) -> anyhow::Result<ConceptDictionary> {
    let bytes = std::fs::read(path)
        .map_err(|err| anyhow::anyhow!("reading {}: {err}", path.display()))?;
    load_dictionary(&bytes, diag).map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))
}

pub fn write_dictionary(path: &Path, dictionary: &ConceptDictionary) -> anyhow::Result<()> {
    let bytes = save_dictionary(dictionary)?;
    std::fs::write(path, bytes)
        .map_err(|err| anyhow::anyhow!("writing {}: {err}", path.display()))
}

//! Error taxonomy for the annotation data layer.
//!
//! Severities follow the data contract:
//! - `MalformedInput` is fatal for the file it came from.
//! - `IndexOutOfRange` / `NotFound` are fatal for the single operation; a
//!   caller embedding this core must abort only that operation, not the
//!   whole session.
//! - `VersionMismatch` is fatal for a single input within a migration
//!   batch; the batch driver skips and reports it.
//!
//! An incompatible (but well-formed) version tag at load time is *not* an
//! error: it is reported through [`crate::diag::Diagnostics`] and
//! processing continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// A required field or structure is missing or unparsable.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A positional concept id past the end of its concept list.
    #[error("concept id {concept_id} out of range for {hex}/{variant} ({len} concepts)")]
    IndexOutOfRange {
        hex: String,
        variant: String,
        concept_id: usize,
        len: usize,
    },

    /// Unknown identifier, variant or occurrence id.
    #[error("not found: {0}")]
    NotFound(String),

    /// A migration applied to data declaring the wrong schema version.
    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

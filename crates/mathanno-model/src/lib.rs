//! Data model for math identifier grounding annotation
//!
//! This crate defines the versioned annotation data that the rest of the
//! workspace reads, mutates and compares:
//!
//! - **Identifier keys**: a math identifier occurrence is keyed by the
//!   lowercase hex encoding of its rendered text plus a style variant.
//! - **Concept dictionary**: identifier → variant → *ordered* list of math
//!   concepts. The list index is the `concept_id` used everywhere else, so
//!   concept lists are append/replace only and never reordered.
//! - **Annotation store**: occurrence id → assigned concept + grounding
//!   spans (SoG), one store per paper per annotator.
//!
//! Persistence lives in `mathanno-storage`; this crate only carries the
//! serde shape of the v1.0 wire format.

pub mod annotation;
pub mod concept;
pub mod diag;
pub mod dictionary;
pub mod error;
pub mod identifier;

pub use annotation::{AnnotationStore, OccurrenceAnnotation, OccurrenceId, SogSpan, WordId, ANNO_VERSION};
pub use concept::{Affix, MathConcept, Surface};
pub use diag::{CollectingDiagnostics, Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use dictionary::{ConceptDictionary, DictEntry, MCDICT_VERSION};
pub use error::DataError;
pub use identifier::{IdentifierHex, IdentifierKey, IdfVariant};

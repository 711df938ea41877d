//! Schema migration v0.2 → v1.0.
//!
//! Pure per-document functions over raw JSON, plus a batch driver over a
//! data directory. v1.0 renames the metadata fields (underscore prefix),
//! converts two-element `[start, stop]` span pairs to the structured
//! `{start, stop, type}` form, and renames `args_type` → `affixes` and
//! `surface` → `_surface`.
//!
//! A file declaring the wrong source version fails with `VersionMismatch`;
//! the batch driver skips and reports it rather than aborting the run.

use crate::canonical::to_canonical_json;
use mathanno_model::{DataError, Diagnostics};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SOURCE_VERSION: &str = "0.2";
pub const TARGET_VERSION: &str = "1.0";

fn require_version(obj: &Map<String, Value>, field: &str) -> Result<(), DataError> {
    let declared = obj.get(field).and_then(Value::as_str).unwrap_or("missing");
    if declared != SOURCE_VERSION {
        return Err(DataError::VersionMismatch {
            expected: SOURCE_VERSION.to_string(),
            found: declared.to_string(),
        });
    }
    Ok(())
}

fn as_object_mut<'a>(
    value: &'a mut Value,
    what: &str,
) -> Result<&'a mut Map<String, Value>, DataError> {
    value
        .as_object_mut()
        .ok_or_else(|| DataError::MalformedInput(format!("{what} is not an object")))
}

// ============================================================================
// Annotation data
// ============================================================================

pub fn migrate_annotation_v0_2_to_v1_0(mut data: Value) -> Result<Value, DataError> {
    let obj = as_object_mut(&mut data, "annotation data")?;
    require_version(obj, "anno_version")?;

    let annotator = obj
        .remove("annotator")
        .unwrap_or_else(|| Value::String("unknown".to_string()));
    obj.remove("anno_version");
    obj.insert("_anno_version".to_string(), json!(TARGET_VERSION));
    obj.insert("_annotator".to_string(), annotator);

    let mi_anno = obj
        .get_mut("mi_anno")
        .ok_or_else(|| DataError::MalformedInput("mi_anno is missing".to_string()))?;
    for (occurrence_id, record) in as_object_mut(mi_anno, "mi_anno")? {
        let record = as_object_mut(record, occurrence_id)?;
        let Some(sog) = record.get_mut("sog") else {
            continue;
        };
        let spans = sog
            .as_array_mut()
            .ok_or_else(|| DataError::MalformedInput(format!("{occurrence_id}: sog is not a list")))?;
        for span in spans {
            let pair = span.as_array().ok_or_else(|| {
                DataError::MalformedInput(format!("{occurrence_id}: sog span is not a pair"))
            })?;
            if pair.len() != 2 {
                return Err(DataError::MalformedInput(format!(
                    "{occurrence_id}: sog span has {} elements",
                    pair.len()
                )));
            }
            let (start, stop) = (pair[0].clone(), pair[1].clone());
            *span = json!({"start": start, "stop": stop, "type": 0});
        }
    }

    Ok(data)
}

// ============================================================================
// Math concept dictionary
// ============================================================================

pub fn migrate_dictionary_v0_2_to_v1_0(mut data: Value) -> Result<Value, DataError> {
    let obj = as_object_mut(&mut data, "mcdict data")?;
    require_version(obj, "mcdict_version")?;

    let author = obj
        .remove("annotator")
        .unwrap_or_else(|| Value::String("unknown".to_string()));
    obj.remove("mcdict_version");
    obj.insert("_mcdict_version".to_string(), json!(TARGET_VERSION));
    obj.insert("_author".to_string(), author);

    let concepts = obj
        .get_mut("concepts")
        .ok_or_else(|| DataError::MalformedInput("concepts is missing".to_string()))?;
    for (hex, entry) in as_object_mut(concepts, "concepts")? {
        let entry = as_object_mut(entry, hex)?;
        if let Some(surface) = entry.remove("surface") {
            entry.insert("_surface".to_string(), surface);
        }

        let Some(identifiers) = entry.get_mut("identifiers") else {
            continue;
        };
        for (variant, list) in as_object_mut(identifiers, "identifiers")? {
            let list = list.as_array_mut().ok_or_else(|| {
                DataError::MalformedInput(format!("{hex}/{variant}: concept list is not a list"))
            })?;
            for concept in list {
                let concept = as_object_mut(concept, "concept")?;
                if let Some(affixes) = concept.remove("args_type") {
                    concept.insert("affixes".to_string(), affixes);
                }
            }
        }
    }

    Ok(data)
}

// ============================================================================
// Batch driver
// ============================================================================

#[derive(Debug, Default)]
pub struct MigrationSummary {
    pub migrated: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, DataError)>,
}

fn migrate_file(
    path: &Path,
    dst: &Path,
    migrate: fn(Value) -> Result<Value, DataError>,
) -> Result<PathBuf, DataError> {
    let bytes =
        std::fs::read(path).map_err(|err| DataError::MalformedInput(err.to_string()))?;
    let data: Value = serde_json::from_slice(&bytes)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;
    let migrated = migrate(data)?;

    let out = dst.join(path.file_name().unwrap_or(path.as_os_str()));
    std::fs::write(&out, to_canonical_json(&migrated)?)
        .map_err(|err| DataError::MalformedInput(err.to_string()))?;
    Ok(out)
}

/// Migrate every `*_anno.json` and `*_mcdict.json` directly under `src`
/// into `dst`. Files that fail (wrong declared version, malformed JSON)
/// are reported and skipped; the rest of the batch continues.
pub fn migrate_directory(
    src: &Path,
    dst: &Path,
    diag: &dyn Diagnostics,
) -> anyhow::Result<MigrationSummary> {
    if dst.exists() {
        anyhow::bail!("{} already exists", dst.display());
    }
    std::fs::create_dir_all(dst)?;

    let mut summary = MigrationSummary::default();
    for entry in WalkDir::new(src).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let migrate = if name.ends_with("_anno.json") {
            migrate_annotation_v0_2_to_v1_0 as fn(Value) -> Result<Value, DataError>
        } else if name.ends_with("_mcdict.json") {
            migrate_dictionary_v0_2_to_v1_0
        } else {
            continue;
        };

        match migrate_file(entry.path(), dst, migrate) {
            Ok(out) => summary.migrated.push(out),
            Err(err) => {
                diag.warn(&format!("skipping {}: {err}", entry.path().display()));
                summary.skipped.push((entry.path().to_path_buf(), err));
            }
        }
    }
    Ok(summary)
}

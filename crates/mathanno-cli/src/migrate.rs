//! Batch schema migration of a data directory.

use anyhow::Result;
use mathanno_model::TracingDiagnostics;
use mathanno_storage::migrate::{migrate_directory, SOURCE_VERSION, TARGET_VERSION};
use std::path::Path;

pub fn run(src: &Path, dst: &Path) -> Result<()> {
    let diag = TracingDiagnostics;
    let summary = migrate_directory(src, dst, &diag)?;

    println!(
        "Migrated {} file(s) from v{SOURCE_VERSION} to v{TARGET_VERSION} into {}",
        summary.migrated.len(),
        dst.display()
    );
    if !summary.skipped.is_empty() {
        println!(
            "Skipped {} file(s), see warnings above",
            summary.skipped.len()
        );
    }
    Ok(())
}

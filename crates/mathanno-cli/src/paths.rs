//! Data file layout: one `<id>_anno.json` and `<id>_mcdict.json` per paper
//! in a data dir, one `<id>.html` per paper in a sources dir.

use std::path::{Path, PathBuf};

pub fn anno_json(dir: &Path, paper_id: &str) -> PathBuf {
    dir.join(format!("{paper_id}_anno.json"))
}

pub fn mcdict_json(dir: &Path, paper_id: &str) -> PathBuf {
    dir.join(format!("{paper_id}_mcdict.json"))
}

pub fn source_html(dir: &Path, paper_id: &str) -> PathBuf {
    dir.join(format!("{paper_id}.html"))
}

pub fn read_source_html(dir: &Path, paper_id: &str) -> anyhow::Result<String> {
    let path = source_html(dir, paper_id);
    std::fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("reading {}: {err}", path.display()))
}

/// Render an undefined rate as `N/A`.
pub fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "N/A".to_string(),
    }
}

pub fn fmt_kappa(kappa: Option<f64>) -> String {
    match kappa {
        Some(kappa) => format!("{kappa:.3}"),
        None => "N/A".to_string(),
    }
}

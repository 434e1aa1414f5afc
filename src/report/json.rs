use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisEntry;

/// JSON report: an array of flat analysis entries. This file doubles as the
/// saved analysis that `export` re-renders later.
pub fn render(entries: &[AnalysisEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("failed to serialize analysis entries")
}

pub fn load(path: &Path) -> Result<Vec<AnalysisEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read analysis file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse analysis file {}", path.display()))
}

use super::files::{atomic_write, read_file};
use crate::domain::Run;
use anyhow::{Context, Result};
use std::path::Path;

/// Ephemeral store for the single current run.
///
/// Exactly one run snapshot exists at a time; once the UI discards a run
/// that reached a terminal status the file is removed. There is no history
/// log.

/// Load the current run, if one is stored
pub fn load_run<P: AsRef<Path>>(path: P) -> Result<Option<Run>> {
    let content = read_file(path)?;
    if content.is_empty() {
        return Ok(None);
    }

    let run: Run = serde_json::from_str(&content).context("Failed to parse run.json")?;
    Ok(Some(run))
}

/// Save the current run snapshot
pub fn save_run<P: AsRef<Path>>(path: P, run: &Run) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("Failed to serialize run")?;
    atomic_write(path, &json)
}

/// Remove the stored run (after the UI clears a terminal run)
pub fn clear_run<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove run snapshot: {}", path.display()))?;
    }
    Ok(())
}

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the cadence directory - checks for a local .cadence first, then falls
/// back to the global ~/.cadence
pub fn get_cadence_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_cadence(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".cadence"))
}

/// Find a local .cadence directory by walking up the directory tree
fn find_local_cadence(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let cadence_dir = current.join(".cadence");
        if cadence_dir.exists() && cadence_dir.is_dir() {
            return Some(cadence_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the cadence directory exists
pub fn ensure_cadence_dir() -> Result<PathBuf> {
    let dir = get_cadence_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .cadence directory in the current directory
pub fn init_local_cadence() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let cadence_dir = current_dir.join(".cadence");

    if cadence_dir.exists() {
        anyhow::bail!("Cadence directory already exists: {}", cadence_dir.display());
    }

    fs::create_dir_all(&cadence_dir)
        .with_context(|| format!("Failed to create directory: {}", cadence_dir.display()))?;

    Ok(cadence_dir)
}

/// Get path to templates.json
pub fn templates_file() -> Result<PathBuf> {
    Ok(ensure_cadence_dir()?.join("templates.json"))
}

/// Get path to run.json (the single current run snapshot)
pub fn run_file() -> Result<PathBuf> {
    Ok(ensure_cadence_dir()?.join("run.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file =
        NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        let content = "{\"ok\":true}";
        atomic_write(&test_file, content).unwrap();

        let read_content = read_file(&test_file).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        let content = read_file(&test_file).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        assert_eq!(read_file(&test_file).unwrap(), "second");
    }
}

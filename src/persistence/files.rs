use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the desk directory, local or in the home directory
pub const DESK_DIR_NAME: &str = ".pomodesk";

/// Get the desk directory - checks for a local .pomodesk first, then falls back to ~/.pomodesk
pub fn get_desk_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_desk(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DESK_DIR_NAME))
}

/// Find a local .pomodesk directory by walking up the directory tree
fn find_local_desk(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let desk_dir = current.join(DESK_DIR_NAME);
        if desk_dir.is_dir() {
            return Some(desk_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the desk directory exists
pub fn ensure_desk_dir() -> Result<PathBuf> {
    let dir = get_desk_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .pomodesk directory in the current directory
pub fn init_local_desk() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let desk_dir = current_dir.join(DESK_DIR_NAME);

    if desk_dir.exists() {
        anyhow::bail!("Desk directory already exists: {}", desk_dir.display());
    }

    fs::create_dir_all(&desk_dir)
        .with_context(|| format!("Failed to create directory: {}", desk_dir.display()))?;

    Ok(desk_dir)
}

/// Path to tasks.json (task list and sort order)
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_desk_dir()?.join("tasks.json"))
}

/// Path to settings.json (interval lengths and alarm)
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_desk_dir()?.join("settings.json"))
}

/// Directory holding the rolling log files
pub fn log_dir() -> Result<PathBuf> {
    let dir = ensure_desk_dir()?.join("logs");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

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

/// Read file content, return None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_local_desk_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let desk = temp_dir.path().join(DESK_DIR_NAME);
        fs::create_dir_all(&desk).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_desk(&nested), Some(desk));
    }

    #[test]
    fn test_find_local_desk_ignores_plain_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(DESK_DIR_NAME), "not a directory").unwrap();

        let found = find_local_desk(&nested);
        assert_ne!(found, Some(nested.join(DESK_DIR_NAME)));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "{}").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("{}"));

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }
}

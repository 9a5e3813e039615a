use crate::todo::Document;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-document TOML persistence
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the document, or an empty one if the file is missing or blank
    pub fn load(&self) -> Result<Document> {
        if !self.file_path.exists() {
            debug!("no storage at {}, starting empty", self.file_path.display());
            return Ok(Document::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        let mut data: Document = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        let repairs = data.reconcile_groups();
        if repairs > 0 {
            warn!(
                "repaired {} group inconsistencies in {}",
                repairs,
                self.file_path.display()
            );
        }
        Ok(data)
    }

    /// Replace the stored document with `data`
    pub fn save(&self, data: &Document) -> Result<()> {
        if let Some(dir) = self.file_path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(data).context("Failed to serialize tasks")?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        debug!(
            "saved {} task(s) and {} group(s)",
            data.tasks().len(),
            data.groups().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::NewTask;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("absent.toml"));
        assert_eq!(storage.load().unwrap(), Document::new());
    }

    #[test]
    fn test_blank_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.toml");
        fs::write(&path, "  \n").unwrap();
        assert!(Storage::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("nested/eagle/storage.toml"));
        let mut data = Document::new();
        data.add_tasks(vec![NewTask::new("first")]);

        storage.save(&data).unwrap();
        assert_eq!(storage.load().unwrap(), data);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "tasks = 5").unwrap();
        assert!(Storage::new(&path).load().is_err());
    }

    #[test]
    fn test_frequency_is_a_tagged_table() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("storage.toml"));
        let mut data = Document::new();
        data.add_tasks(vec![
            NewTask::new("weekly").with_frequency("2w"),
            NewTask::new("plain").with_frequency("-"),
        ]);
        storage.save(&data).unwrap();

        let content = fs::read_to_string(storage.path()).unwrap();
        assert!(content.contains("kind = \"recurring\""));
        assert!(content.contains("unit = \"week\""));
        assert_eq!(content.matches("kind =").count(), 1);
    }
}

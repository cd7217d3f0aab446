use crate::domain::ports::Storage;
use crate::utils::error::{ChartError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Regular files directly under the base folder, sorted by name.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.base_path.is_dir() {
            return Err(ChartError::FolderNotFound {
                path: self.base_path.display().to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }

        if files.is_empty() {
            return Err(ChartError::EmptyFolder {
                path: self.base_path.display().to_string(),
            });
        }

        files.sort();
        Ok(files)
    }
}

impl Storage for LocalStorage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

use crate::core::interfaces::FileSystemService;
use crate::utils::{Result, ShiboriError};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await.map_err(ShiboriError::Io)
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(ShiboriError::Io)?;
        }

        fs::write(path, content).await.map_err(ShiboriError::Io)
    }

    async fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut to_visit = vec![path.to_path_buf()];

        while let Some(dir) = to_visit.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(ShiboriError::Io)?;

            while let Some(entry) = entries.next_entry().await.map_err(ShiboriError::Io)? {
                let entry_path = entry.path();
                let file_type = entry.file_type().await.map_err(ShiboriError::Io)?;
                if file_type.is_dir() {
                    to_visit.push(entry_path);
                } else if file_type.is_file() {
                    files.push(entry_path);
                }
            }
        }

        Ok(files)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

use crate::core::Storage;
use crate::utils::error::{OutreachError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Local file system storage. Paths are used as given; parent directories
/// are created on write.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => OutreachError::FileNotFound {
                path: path.to_string(),
            },
            _ => OutreachError::IoError(e),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/output/leads.csv");
        let path = path.to_str().unwrap();

        let storage = LocalStorage::new();
        storage.write_file(path, b"Name\n").await.unwrap();

        assert_eq!(storage.read_file(path).await.unwrap(), b"Name\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_as_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leadlist.csv");

        let result = LocalStorage::new().read_file(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(OutreachError::FileNotFound { .. })));
    }
}

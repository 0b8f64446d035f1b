use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// 啟動時先建立上傳目錄
    pub fn ensure_base_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_path)?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("custom_music").to_str().unwrap().to_string());

        let path = storage.write_file("beat.wav", b"RIFF").await.unwrap();
        assert_eq!(path, dir.path().join("custom_music").join("beat.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");

        storage.write_file("beat.wav", b"RIFF2").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF2");
    }

    #[test]
    fn test_ensure_base_dir() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("EDGE").join("custom_music");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.ensure_base_dir().unwrap();
        assert!(base.is_dir());
        assert_eq!(storage.base_path(), base.to_str().unwrap());
    }
}

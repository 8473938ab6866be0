use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::image::errors::ImageError;
use crate::image::ports::ImageStorage;

/// Stores images as plain files in one directory.
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    /// Use an existing directory as the storage root.
    ///
    /// # Errors
    /// * `Storage` - Path is missing or not a directory
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, ImageError> {
        let root = root.as_ref().to_path_buf();
        let metadata = fs::metadata(&root)
            .await
            .map_err(|e| ImageError::Storage(format!("{}: {}", root.display(), e)))?;

        if !metadata.is_dir() {
            return Err(ImageError::Storage(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, ImageError> {
        // Stored names are always a single path component
        if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
            return Err(ImageError::Storage(format!(
                "Refusing to use {:?} as a filename",
                filename
            )));
        }
        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<(), ImageError> {
        let path = self.path_for(filename)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| ImageError::Storage(format!("{}: {}", path.display(), e)))?;

        file.write_all(data)
            .await
            .map_err(|e| ImageError::Storage(format!("{}: {}", path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| ImageError::Storage(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), size = data.len(), "Image file written");

        Ok(())
    }

    async fn remove(&self, filename: &str) -> Result<(), ImageError> {
        let path = self.path_for(filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageError::Storage(format!("{}: {}", path.display(), e))),
        }
    }
}

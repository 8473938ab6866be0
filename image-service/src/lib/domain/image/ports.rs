use async_trait::async_trait;

use crate::domain::image::models::Image;
use crate::domain::image::models::ImageUpload;
use crate::domain::image::models::OwnerId;
use crate::domain::image::models::Page;
use crate::image::errors::ImageError;

/// Port for per-user image operations.
#[async_trait]
pub trait ImageServicePort: Send + Sync + 'static {
    /// Store an uploaded image and record it for its owner.
    ///
    /// # Arguments
    /// * `owner` - Verified identity uploading the image
    /// * `upload` - Validated image file
    ///
    /// # Returns
    /// Image record under its stored filename
    ///
    /// # Errors
    /// * `Storage` - Writing the file failed
    /// * `Database` - Recording the image failed
    async fn upload_image(&self, owner: OwnerId, upload: ImageUpload) -> Result<Image, ImageError>;

    /// List an owner's images ordered by filename.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn list_images(&self, owner: OwnerId, page: Page) -> Result<Vec<Image>, ImageError>;
}

/// Image record persistence.
#[async_trait]
pub trait ImageRepository: Send + Sync + 'static {
    /// Record a stored image.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn insert(&self, image: &Image) -> Result<(), ImageError>;

    /// Retrieve one page of an owner's images ordered by filename.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_owner(&self, owner: OwnerId, page: Page) -> Result<Vec<Image>, ImageError>;
}

/// Image file storage.
#[async_trait]
pub trait ImageStorage: Send + Sync + 'static {
    /// Write image bytes under `filename`; never overwrites an existing file.
    ///
    /// # Errors
    /// * `Storage` - File could not be written
    async fn store(&self, filename: &str, data: &[u8]) -> Result<(), ImageError>;

    /// Remove a previously stored file.
    ///
    /// # Errors
    /// * `Storage` - File could not be removed
    async fn remove(&self, filename: &str) -> Result<(), ImageError>;
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::image::models::Image;
use crate::domain::image::models::ImageUpload;
use crate::domain::image::models::OwnerId;
use crate::domain::image::models::Page;
use crate::image::errors::ImageError;
use crate::image::ports::ImageRepository;
use crate::image::ports::ImageServicePort;
use crate::image::ports::ImageStorage;

/// Domain service implementation for image upload and listing.
///
/// Generic over repository and storage for testability.
pub struct ImageService<IR, IS>
where
    IR: ImageRepository,
    IS: ImageStorage,
{
    repository: Arc<IR>,
    storage: Arc<IS>,
}

impl<IR, IS> ImageService<IR, IS>
where
    IR: ImageRepository,
    IS: ImageStorage,
{
    pub fn new(repository: Arc<IR>, storage: Arc<IS>) -> Self {
        Self {
            repository,
            storage,
        }
    }
}

#[async_trait]
impl<IR, IS> ImageServicePort for ImageService<IR, IS>
where
    IR: ImageRepository,
    IS: ImageStorage,
{
    async fn upload_image(&self, owner: OwnerId, upload: ImageUpload) -> Result<Image, ImageError> {
        let image = Image {
            filename: upload.stored_filename(),
            owner,
        };

        self.storage.store(&image.filename, upload.data()).await?;

        if let Err(err) = self.repository.insert(&image).await {
            // The file is unreachable without its record
            if let Err(cleanup) = self.storage.remove(&image.filename).await {
                tracing::warn!(
                    filename = %image.filename,
                    error = %cleanup,
                    "Failed to remove orphaned image file"
                );
            }
            return Err(err);
        }

        tracing::info!(
            owner_id = %owner,
            filename = %image.filename,
            content_type = upload.content_type(),
            size = upload.data().len(),
            "Image uploaded"
        );

        Ok(image)
    }

    async fn list_images(&self, owner: OwnerId, page: Page) -> Result<Vec<Image>, ImageError> {
        self.repository.find_by_owner(owner, page).await
    }
}

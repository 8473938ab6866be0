use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ImageResponseData;
use crate::domain::image::models::ImageUpload;
use crate::domain::image::models::OwnerId;
use crate::image::errors::ImageError;
use crate::image::errors::UploadError;
use crate::image::ports::ImageServicePort;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

pub async fn upload_image<IS: ImageServicePort>(
    State(state): State<AppState<IS>>,
    AuthenticatedUser(identity): AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiSuccess<ImageResponseData>, ApiError> {
    let multipart = multipart.map_err(|e| ImageError::from(UploadError::Multipart(e.to_string())))?;
    let upload = read_image(multipart).await.map_err(ImageError::from)?;

    state
        .image_service
        .upload_image(OwnerId::from(identity.non_zero_id()), upload)
        .await
        .map_err(ApiError::from)
        .map(|ref image| ApiSuccess::new(StatusCode::CREATED, image.into()))
}

/// Take the first `image` field; other fields are skipped.
async fn read_image(mut multipart: Multipart) -> Result<ImageUpload, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        return ImageUpload::new(filename.as_deref(), content_type.as_deref(), data.to_vec());
    }

    Err(UploadError::MissingField(IMAGE_FIELD))
}

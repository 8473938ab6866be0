use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::image::models::Image;
use crate::domain::image::models::Page;
use crate::image::errors::ImageError;

pub mod list_images;
pub mod upload_image;

pub use list_images::list_images;
pub use upload_image::upload_image;

/// Body for every rejected token, kept apart from the sign-in "Bad credentials".
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const NO_IMAGE: &str = "No image is present";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::InvalidUpload(reason) => {
                tracing::info!(reason = %reason, "Upload rejected");
                ApiError::UnprocessableEntity(NO_IMAGE.to_string())
            }
            ImageError::InvalidOwnerId(_) | ImageError::Storage(_) | ImageError::Database(_) => {
                tracing::error!(error = %err, "Request failed with internal error");
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResponseData {
    pub filename: String,
}

impl From<&Image> for ImageResponseData {
    fn from(image: &Image) -> Self {
        Self {
            filename: image.filename.clone(),
        }
    }
}

/// `?limit=&offset=` on the listing route.
///
/// Absent or non-numeric values read as zero; a zero limit means unlimited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListImagesParams {
    limit: Option<String>,
    offset: Option<String>,
}

impl ListImagesParams {
    pub fn page(&self) -> Page {
        Page::new(parse_or_zero(&self.limit), parse_or_zero(&self.offset))
    }
}

fn parse_or_zero(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

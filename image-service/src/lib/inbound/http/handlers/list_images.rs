use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ImageResponseData;
use super::ListImagesParams;
use crate::domain::image::models::OwnerId;
use crate::image::ports::ImageServicePort;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_images<IS: ImageServicePort>(
    State(state): State<AppState<IS>>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(params): Query<ListImagesParams>,
) -> Result<ApiSuccess<Vec<ImageResponseData>>, ApiError> {
    state
        .image_service
        .list_images(OwnerId::from(identity.non_zero_id()), params.page())
        .await
        .map_err(ApiError::from)
        .map(|images| {
            let image_data: Vec<ImageResponseData> = images.iter().map(|i| i.into()).collect();
            ApiSuccess::new(StatusCode::OK, image_data)
        })
}

use std::sync::Arc;
use std::time::Duration;

use auth::TokenVerifier;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::list_images;
use super::handlers::upload_image;
use super::middleware::authenticate;
use crate::image::ports::ImageServicePort;

pub struct AppState<IS: ImageServicePort> {
    pub image_service: Arc<IS>,
}

impl<IS: ImageServicePort> Clone for AppState<IS> {
    fn clone(&self) -> Self {
        Self {
            image_service: Arc::clone(&self.image_service),
        }
    }
}

/// Limits applied to every request
#[derive(Debug, Clone, Copy)]
pub struct HttpLimits {
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

pub fn create_router<IS: ImageServicePort>(
    image_service: Arc<IS>,
    token_verifier: Arc<TokenVerifier>,
    limits: HttpLimits,
) -> Router {
    let state = AppState { image_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route(
            "/images",
            get(list_images::<IS>).post(upload_image::<IS>),
        )
        .route_layer(middleware::from_fn_with_state(token_verifier, authenticate))
        .layer(DefaultBodyLimit::max(limits.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(TimeoutLayer::new(limits.request_timeout))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

//! Documentation routes.

use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::scalar::Scalar;
use axum::Extension;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{Router, get};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::OpenApiConfig;

/// Rendered OpenAPI document shared by the JSON route.
#[derive(Debug, Clone)]
struct RenderedDocument(Arc<str>);

/// Builds the router serving `document` and the Scalar UI pointing at it.
///
/// Requests get an `x-request-id` and are traced through [`TraceLayer`].
pub fn docs_router(document: String, config: &OpenApiConfig) -> Router {
    async fn serve_openapi(Extension(document): Extension<RenderedDocument>) -> impl IntoResponse {
        (
            [(header::CONTENT_TYPE, "application/json")],
            document.0.to_string(),
        )
    }

    let scalar = Scalar::new(&config.open_api_json);
    let router: Router = ApiRouter::new()
        .route(&config.scalar_ui, scalar.axum_route())
        .route(&config.open_api_json, get(serve_openapi))
        .into();

    router
        .layer(Extension(RenderedDocument(Arc::from(document))))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

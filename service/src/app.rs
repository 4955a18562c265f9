//! Router assembly shared by the server binary and integration tests.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::rest::{self, ApiDoc, AppState};

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Build the CORS policy for `origins`.
///
/// `"*"` anywhere in the list allows any origin; an empty list blocks all
/// cross-origin requests. Entries that are not valid header values are
/// skipped.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?origins, "CORS allowed origins configured");
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// Assemble the full application router.
///
/// Layers, innermost first: shared extensions, request tracing, CORS.
pub fn build_app(state: Arc<AppState>, build_info: BuildInfo, config: &Config) -> Router {
    let mut app = Router::new()
        .nest("/api/v1", rest::router())
        .route("/health", get(health_check));

    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(Extension(state))
        .layer(Extension(build_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors.allowed_origins))
}

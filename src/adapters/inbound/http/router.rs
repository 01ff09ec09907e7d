use super::error::ApiError;
use super::handlers::{health, nvd, sboms, settings};
use super::middleware::log_requests;
use super::state::AppState;
use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Builds the full `/api` router with CORS and request logging applied
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route("/sboms", get(sboms::list_sboms).post(sboms::create_sbom))
        .route(
            "/sboms/{id}",
            get(sboms::get_sbom)
                .patch(sboms::update_sbom)
                .delete(sboms::delete_sbom),
        )
        .route("/nvd/search", get(nvd::search))
        .route("/nvd/versions", get(nvd::versions))
        .route("/nvd/vulnerabilities", get(nvd::vulnerabilities))
        .route("/settings", get(settings::get_settings))
        .route("/settings/nvd-key", post(settings::update_nvd_key))
        .fallback(|| async { ApiError::not_found("Not found") });

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(log_requests))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

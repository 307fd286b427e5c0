use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::caller::{require_admin_key, require_caller};
use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod admin;
pub mod luggage;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public, caller-scoped luggage, and admin routes
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Luggage routes; every call carries a caller identity
    let luggage_routes = Router::new()
        .route("/luggage", get(luggage::list).post(luggage::check_in))
        .route("/luggage/:id", get(luggage::get).delete(luggage::remove))
        .route("/luggage/:id/en-route", post(luggage::en_route))
        .route("/luggage/:id/ready", post(luggage::ready_for_collection))
        .route("/luggage/:id/collect", post(luggage::collect))
        .route("/luggage/:id/owner", get(luggage::verify_owner))
        .route("/stats", get(luggage::stats))
        .route_layer(middleware::from_fn(require_caller));

    // Admin routes
    let admin_routes = Router::new()
        .route("/admin/luggage", delete(admin::clear_all))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_key));

    // Compose
    public
        .merge(luggage_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(middleware::from_fn(observability::track_metrics))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

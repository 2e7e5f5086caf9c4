//! Router assembly and middleware layering.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{alerts, app_state::AppState, handlers::members, pagination};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/members",
            axum::routing::post(members::create_member)
                .put(members::update_member)
                .get(members::get_all_members),
        )
        .route(
            "/api/members/{id}",
            get(members::get_member).delete(members::delete_member),
        )
        // wildcard so free text with dots and encoded slashes stays intact
        .route("/_search/members/{*query}", get(members::search_members))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        // browser clients only see response headers exposed here
        .expose_headers([
            pagination::TOTAL_COUNT_HEADER.clone(),
            header::LINK,
            alerts::ALERT_HEADER.clone(),
            alerts::PARAMS_HEADER.clone(),
        ]);

    if state.config.cors_allowed_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

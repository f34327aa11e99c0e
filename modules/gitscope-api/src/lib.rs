use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    response::Html,
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use gitscope_analyzer::ProfileAggregator;

pub mod rest;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub struct AppState {
    pub aggregator: ProfileAggregator,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(index))
        // Health check
        .route("/health", get(|| async { "ok" }))
        // REST API
        .route(
            "/analyze",
            get(rest::api_analyze_missing).post(rest::api_analyze_body),
        )
        .route("/analyze/{username}", get(rest::api_analyze_path))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Every analysis is computed fresh; nothing downstream should cache it
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

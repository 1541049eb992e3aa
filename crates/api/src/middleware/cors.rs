use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS for the JSON API. The admin UI may be served from another origin;
/// it authenticates with a bearer header, never cookies.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

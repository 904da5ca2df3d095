//! Router assembly for the Sharp Toolkit API.
//!
//! Kept out of `main` so integration tests can drive the router directly
//! without binding a socket.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

/// Origins allowed to call the API: the two local dev servers and the
/// deployed frontend.
const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "https://sharp-tools.netlify.app",
];

/// Uploads are held in memory, so cap request bodies well above any
/// realistic PDF rather than at the framework default.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Build the application router.
pub fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.map(HeaderValue::from_static),
        ))
        .allow_methods([Method::GET, Method::POST]);

    let mut app = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // PDF operations
        .route("/split", post(handlers::split))
        .route("/merge", post(handlers::merge));

    // Production serves the bundled frontend; unknown paths fall back to
    // the entry page so the client-side router resolves them.
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string());
    if Path::new(&static_dir).is_dir() {
        let index = Path::new(&static_dir).join("index.html");
        app = app.fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)));
    }

    // Add middleware
    app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

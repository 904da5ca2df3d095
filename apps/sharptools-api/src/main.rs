//! Sharp Toolkit API server - backend for the browser PDF utilities
//!
//! Hosts the split and merge endpoints and, in production, the bundled
//! frontend.

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sharptools_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let app = sharptools_api::app();

    // The hosting platform provides PORT dynamically
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Sharp Toolkit API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

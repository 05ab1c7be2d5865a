//! Host router: SSR pages, the WASM bundle, and a health probe.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal's data lives behind the external review backend; this binary
//! only renders the Leptos shell and serves static assets. The browser talks
//! to the backend directly.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::{App, shell};
use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("leptos configuration: {0}")]
    Config(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the router from `[package.metadata.leptos]`.
///
/// # Errors
///
/// Returns [`ServerError::Config`] if the Leptos configuration cannot be
/// loaded.
pub fn router() -> Result<Router, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Config(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);
    let pkg_dir = PathBuf::from(leptos_options.site_root.as_ref()).join(&*leptos_options.site_pkg_dir);

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options))
}

/// Bind `config`'s address and serve until the process exits.
///
/// # Errors
///
/// Returns an error if configuration fails, the address cannot be bound, or
/// the server stops with an I/O error.
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let app = router()?;
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "review-portal listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

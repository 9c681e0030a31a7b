//! Beacon registry HTTP server: axum router, bearer-token middleware,
//! wire DTOs and configuration loading.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Router, middleware};
use surrealdb::Connection;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Path prefix every API route is served under.
pub const API_PREFIX: &str = "/spring-api";

/// Build the application router. Every API route requires a valid
/// bearer token; the OpenAPI document does not.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    let api = api::routes::<C>().layer(middleware::from_fn_with_state(
        state.auth.clone(),
        auth::require_bearer,
    ));
    let doc = Arc::new(api::openapi::ApiDoc::openapi());

    Router::new()
        .route(
            api::openapi::OPENAPI_PATH,
            get(move || api::openapi::serve_document(doc.clone())),
        )
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Beacon registry listening");
    axum::serve(listener, app).await?;
    Ok(())
}

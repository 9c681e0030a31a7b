//! HTTP handlers, one module per resource.

pub mod account_holder;
pub mod envelope;
pub mod legacy_beacon;
pub mod openapi;
pub mod registration;

use axum::Router;
use surrealdb::Connection;

use crate::state::AppState;

pub fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .merge(account_holder::routes())
        .merge(legacy_beacon::routes())
        .merge(registration::routes())
}

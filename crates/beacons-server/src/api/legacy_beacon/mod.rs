//! `/legacy-beacon` handlers.

pub mod dto;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use beacons_core::ids::LegacyBeaconId;
use surrealdb::Connection;
use uuid::Uuid;

use self::dto::{DeleteLegacyBeaconDto, LegacyBeaconDto};
use crate::api::envelope::Wrapper;
use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/legacy-beacon/{id}", get(find_by_id::<C>))
        .route(
            "/legacy-beacon/backoffice/{id}/delete",
            patch(delete::<C>),
        )
}

#[utoipa::path(
    get,
    path = "/spring-api/legacy-beacon/{id}",
    tag = "Legacy Beacon",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, body = Wrapper<LegacyBeaconDto>),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn find_by_id<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Wrapper<LegacyBeaconDto>>> {
    let legacy = state
        .legacy_beacons
        .find_by_id(LegacyBeaconId::from(id))
        .await?;
    Ok(Json(LegacyBeaconDto::wrap(legacy)))
}

#[utoipa::path(
    patch,
    path = "/spring-api/legacy-beacon/backoffice/{id}/delete",
    tag = "Legacy Beacon",
    params(("id" = Uuid, Path)),
    request_body = DeleteLegacyBeaconDto,
    responses(
        (status = 200, description = "deleted"),
        (status = 400, description = "path and body ids differ", body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
    Json(body): Json<DeleteLegacyBeaconDto>,
) -> ApiResult<StatusCode> {
    state
        .legacy_beacons
        .delete(LegacyBeaconId::from(id), body.into())
        .await?;
    Ok(StatusCode::OK)
}

//! `/registrations` handlers.

pub mod dto;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use beacons_core::error::BeaconsError;
use beacons_core::ids::{AccountHolderId, BeaconId};
use serde::Deserialize;
use surrealdb::Connection;
use utoipa::IntoParams;
use uuid::Uuid;

use self::dto::{CreateRegistrationDto, DeleteRegistrationDto, RegistrationDto};
use crate::auth::Caller;
use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/registrations", get(list_by_account_holder::<C>))
        .route("/registrations/register", post(register::<C>))
        .route("/registrations/register/{id}", patch(update::<C>))
        .route(
            "/registrations/{id}",
            get(get_by_beacon_id::<C>).delete(permanent_delete::<C>),
        )
        .route("/registrations/{id}/delete", patch(soft_delete::<C>))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(super) struct AccountHolderQuery {
    account_holder_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(super) struct ScopeQuery {
    /// Restrict the lookup to this account holder's registrations.
    account_holder_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/spring-api/registrations/register",
    tag = "Registration",
    request_body = CreateRegistrationDto,
    responses(
        (status = 201, body = RegistrationDto),
        (status = 400, body = ErrorBody),
        (status = 404, description = "unknown account holder", body = ErrorBody),
    )
)]
pub(super) async fn register<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateRegistrationDto>,
) -> ApiResult<(StatusCode, Json<RegistrationDto>)> {
    let registration = state.registrations.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(registration.into())))
}

#[utoipa::path(
    patch,
    path = "/spring-api/registrations/register/{id}",
    tag = "Registration",
    params(("id" = Uuid, Path)),
    request_body = CreateRegistrationDto,
    responses(
        (status = 200, body = RegistrationDto),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateRegistrationDto>,
) -> ApiResult<Json<RegistrationDto>> {
    let registration = state
        .registrations
        .update(BeaconId::from(id), body.into())
        .await?;
    Ok(Json(registration.into()))
}

/// With `?accountHolderId=` the lookup is restricted to that account
/// holder's registrations, and the caller must be acting for them.
#[utoipa::path(
    get,
    path = "/spring-api/registrations/{id}",
    tag = "Registration",
    params(("id" = Uuid, Path), ScopeQuery),
    responses(
        (status = 200, body = RegistrationDto),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn get_by_beacon_id<C: Connection>(
    State(state): State<AppState<C>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(query): Query<ScopeQuery>,
) -> ApiResult<Json<RegistrationDto>> {
    let beacon_id = BeaconId::from(id);

    let registration = match query.account_holder_id.map(AccountHolderId::from) {
        Some(account_holder_id) => {
            caller.0.ensure_acts_for(account_holder_id)?;
            state
                .registrations
                .get_by_beacon_id_and_account_holder_id(beacon_id, account_holder_id)
                .await?
        }
        None => state.registrations.get_by_beacon_id(beacon_id).await?,
    };

    let owner = registration.beacon.account_holder_id;
    let mut dto = RegistrationDto::from(registration);
    dto.account_holder = match state.account_holders.get_account_holder(owner).await {
        Ok(holder) => Some(holder.into()),
        Err(BeaconsError::NotFound { .. }) => None,
        Err(err) => return Err(err.into()),
    };

    Ok(Json(dto))
}

#[utoipa::path(
    get,
    path = "/spring-api/registrations",
    tag = "Registration",
    params(AccountHolderQuery),
    responses((status = 200, body = [RegistrationDto]))
)]
pub(super) async fn list_by_account_holder<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<AccountHolderQuery>,
) -> ApiResult<Json<Vec<RegistrationDto>>> {
    let registrations = state
        .registrations
        .get_by_account_holder_id(AccountHolderId::from(query.account_holder_id))
        .await?;
    Ok(Json(registrations.into_iter().map(Into::into).collect()))
}

/// Only the owning account holder, or back-office staff, may delete.
#[utoipa::path(
    patch,
    path = "/spring-api/registrations/{id}/delete",
    tag = "Registration",
    params(("id" = Uuid, Path)),
    request_body = DeleteRegistrationDto,
    responses(
        (status = 200, description = "deleted"),
        (status = 400, description = "path and body ids differ", body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn soft_delete<C: Connection>(
    State(state): State<AppState<C>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(body): Json<DeleteRegistrationDto>,
) -> ApiResult<StatusCode> {
    caller.0.ensure_acts_for(body.account_holder_id)?;

    state
        .registrations
        .soft_delete(BeaconId::from(id), body.into())
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/spring-api/registrations/{id}",
    tag = "Registration",
    params(("id" = Uuid, Path)),
    responses((status = 200, description = "deleted, or already gone"))
)]
pub(super) async fn permanent_delete<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .registrations
        .permanent_delete(BeaconId::from(id))
        .await?;
    Ok(StatusCode::OK)
}

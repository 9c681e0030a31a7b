//! `/account-holder` handlers.

pub mod dto;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use beacons_core::ids::AccountHolderId;
use beacons_service::token::UPDATE_RECORDS_ROLE;
use serde::Deserialize;
use surrealdb::Connection;
use utoipa::IntoParams;
use uuid::Uuid;

use self::dto::{AccountHolderDto, CreateAccountHolderDto, UpdateAccountHolderDto};
use crate::api::envelope::Wrapper;
use crate::api::registration::dto::BeaconDto;
use crate::auth::Caller;
use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

pub fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route(
            "/account-holder",
            post(create::<C>).get(get_by_auth_id::<C>),
        )
        .route(
            "/account-holder/{id}",
            get(get_by_id::<C>).patch(update::<C>),
        )
        .route("/account-holder/{id}/beacons", get(beacons::<C>))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(super) struct AuthIdQuery {
    /// Subject issued by the identity provider.
    auth_id: String,
}

#[utoipa::path(
    post,
    path = "/spring-api/account-holder",
    tag = "Account Holder",
    request_body = Wrapper<CreateAccountHolderDto>,
    responses(
        (status = 201, body = Wrapper<AccountHolderDto>),
        (status = 400, body = ErrorBody),
        (status = 409, description = "auth id already registered", body = ErrorBody),
    )
)]
pub(super) async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<Wrapper<CreateAccountHolderDto>>,
) -> ApiResult<(StatusCode, Json<Wrapper<AccountHolderDto>>)> {
    let created = state
        .account_holders
        .create(body.into_attributes().into())
        .await?;
    Ok((StatusCode::CREATED, Json(AccountHolderDto::wrap(created))))
}

#[utoipa::path(
    get,
    path = "/spring-api/account-holder/{id}",
    tag = "Account Holder",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, body = Wrapper<AccountHolderDto>),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn get_by_id<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Wrapper<AccountHolderDto>>> {
    let holder = state
        .account_holders
        .get_account_holder(AccountHolderId::from(id))
        .await?;
    Ok(Json(AccountHolderDto::wrap(holder)))
}

#[utoipa::path(
    get,
    path = "/spring-api/account-holder",
    tag = "Account Holder",
    params(AuthIdQuery),
    responses(
        (status = 200, body = Wrapper<AccountHolderDto>),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn get_by_auth_id<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<AuthIdQuery>,
) -> ApiResult<Json<Wrapper<AccountHolderDto>>> {
    let holder = state
        .account_holders
        .get_account_holder_by_auth_id(&query.auth_id)
        .await?;
    Ok(Json(AccountHolderDto::wrap(holder)))
}

/// Beacons the account holder has not deleted.
#[utoipa::path(
    get,
    path = "/spring-api/account-holder/{id}/beacons",
    tag = "Account Holder",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = [BeaconDto]))
)]
pub(super) async fn beacons<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BeaconDto>>> {
    let beacons = state
        .account_holders
        .get_beacons_by_account_holder_id(AccountHolderId::from(id))
        .await?;
    Ok(Json(beacons.into_iter().map(Into::into).collect()))
}

/// Back-office only.
#[utoipa::path(
    patch,
    path = "/spring-api/account-holder/{id}",
    tag = "Account Holder",
    params(("id" = Uuid, Path)),
    request_body = Wrapper<UpdateAccountHolderDto>,
    responses(
        (status = 200, body = Wrapper<AccountHolderDto>),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub(super) async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(body): Json<Wrapper<UpdateAccountHolderDto>>,
) -> ApiResult<Json<Wrapper<AccountHolderDto>>> {
    caller.0.require_role(UPDATE_RECORDS_ROLE)?;

    let holder = state
        .account_holders
        .update_account_holder(AccountHolderId::from(id), body.into_attributes().into())
        .await?;
    Ok(Json(AccountHolderDto::wrap(holder)))
}

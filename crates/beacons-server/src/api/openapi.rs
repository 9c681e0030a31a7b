//! OpenAPI description of the API, served unauthenticated at
//! [`OPENAPI_PATH`].

use std::sync::Arc;

use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::{account_holder, legacy_beacon, registration};
use crate::error::ErrorBody;

pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Beacon registry API"),
    paths(
        account_holder::create,
        account_holder::get_by_id,
        account_holder::get_by_auth_id,
        account_holder::beacons,
        account_holder::update,
        legacy_beacon::find_by_id,
        legacy_beacon::delete,
        registration::register,
        registration::update,
        registration::get_by_beacon_id,
        registration::list_by_account_holder,
        registration::soft_delete,
        registration::permanent_delete,
    ),
    components(schemas(ErrorBody)),
    modifiers(&BearerAuth),
    security(("bearer" = [])),
    tags(
        (name = "Account Holder"),
        (name = "Legacy Beacon"),
        (name = "Registration"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
    }
}

pub(crate) async fn serve_document(doc: Arc<utoipa::openapi::OpenApi>) -> Response {
    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
}

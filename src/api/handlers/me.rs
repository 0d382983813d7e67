//! Authenticated self-service endpoint: echoes the identity the gate
//! resolved from the bearer token.

use axum::{extract::Extension, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::token::Identity;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "The authenticated identity", body = MeResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_token" = [])),
    tag = "me"
)]
pub async fn me(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    Json(MeResponse {
        id: identity.id,
        email: identity.email,
        name: identity.name,
    })
}

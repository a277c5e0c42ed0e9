//! Handlers for link management endpoints (create, list, inspect, delete).
//!
//! All handlers here run behind the access-token middleware and receive the
//! owner's account id as an explicit [`CurrentAccount`] extension.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::api::dto::links::{CreateLinkRequest, LinkEnvelope, LinkListEnvelope, LinkResponse};
use crate::api::middleware::auth::CurrentAccount;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
    pub message: &'static str,
}

/// Creates a shortened link owned by the authenticated account.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Errors
///
/// Returns 400 for a missing/malformed destination or custom code, 409 if the
/// requested code is taken, 500 if random allocation exhausts its retries.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(owner_id)): Extension<CurrentAccount>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .create_link(owner_id, payload.long_url, payload.code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkEnvelope {
            ok: true,
            data: LinkResponse::from(&link),
        }),
    ))
}

/// Lists the authenticated account's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(owner_id)): Extension<CurrentAccount>,
) -> Result<Json<LinkListEnvelope>, AppError> {
    let links = state.link_service.list_links(owner_id).await?;

    Ok(Json(LinkListEnvelope {
        ok: true,
        data: links.iter().map(LinkResponse::from).collect(),
    }))
}

/// Returns stats for one of the authenticated account's links.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 whether the code does not exist or belongs to another account.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentAccount(owner_id)): Extension<CurrentAccount>,
) -> Result<Json<LinkEnvelope>, AppError> {
    let link = state.link_service.get_link(owner_id, &code).await?;

    Ok(Json(LinkEnvelope {
        ok: true,
        data: LinkResponse::from(&link),
    }))
}

/// Deletes one of the authenticated account's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns the same merged 404 as the stats endpoint for a missing code or a
/// foreign owner.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentAccount(owner_id)): Extension<CurrentAccount>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(owner_id, &code).await?;

    Ok(Json(DeleteResponse {
        ok: true,
        message: "Link deleted successfully",
    }))
}

//! JSON dialog API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::waitlist::{DialogError, DialogSnapshot};

/// Request body for a submission.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub email: String,
}

/// Response body for the waitlist size.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

/// POST /api/dialogs - Open a dialog.
pub async fn open(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DialogSnapshot>), DialogError> {
    let snapshot = state.waitlist.open().await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/dialogs/{id} - Dialog state.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DialogSnapshot>, DialogError> {
    state.waitlist.snapshot(id).await.map(Json)
}

/// POST /api/dialogs/{id}/submit - Submit an email.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<DialogSnapshot>, DialogError> {
    state.waitlist.submit(id, &req.email).await.map(Json)
}

/// PATCH /api/dialogs/{id}/input - Replace the input, clearing any error.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<DialogSnapshot>, DialogError> {
    state.waitlist.edit(id, &req.email).await.map(Json)
}

/// DELETE /api/dialogs/{id} - Close a dialog.
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DialogError> {
    state.waitlist.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/waitlist/count - Number of signups. Addresses are never exposed.
pub async fn waitlist_count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.waitlist.waitlist_len().await,
    })
}

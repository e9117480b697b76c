//! HTTP handlers.
//!
//! - [`pages`]: HTML page and HTMX dialog fragments
//! - [`dialogs`]: the same dialog lifecycle as JSON

pub mod dialogs;
pub mod pages;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Serialize;

use crate::AppState;
use crate::waitlist::DialogError;

/// Routes for pages, fragments and the JSON API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/waitlist/dialogs", post(pages::open_dialog))
        .route(
            "/waitlist/dialogs/{id}",
            get(pages::dialog_fragment).delete(pages::close_dialog),
        )
        .route("/waitlist/dialogs/{id}/submit", post(pages::submit_dialog))
        .route("/waitlist/dialogs/{id}/input", patch(pages::edit_dialog))
        .route("/api/dialogs", post(dialogs::open))
        .route("/api/dialogs/{id}", get(dialogs::get).delete(dialogs::close))
        .route("/api/dialogs/{id}/submit", post(dialogs::submit))
        .route("/api/dialogs/{id}/input", patch(dialogs::edit))
        .route("/api/waitlist/count", get(dialogs::waitlist_count))
        .route("/healthz", get(healthz))
}

/// GET /healthz - Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for DialogError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::AtCapacity { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

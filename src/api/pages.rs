//! HTML page and HTMX fragment handlers.
//!
//! Fragment handlers answer "dialog closed" with an empty 200 body rather
//! than 404, because HTMX only swaps successful responses and the empty
//! swap is what removes the modal.

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::ui::{PageContext, render_dialog, render_field_error, render_page};
use crate::waitlist::DialogError;

/// Form body of the dialog's submit.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    /// Raw email field; absent is treated as empty.
    #[serde(default)]
    pub email: String,
}

/// GET / - The landing page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let context = PageContext {
        current_year: Utc::now().year(),
        analytics_id: state
            .config
            .integrations
            .analytics_id()
            .map(str::to_owned),
    };
    Html(render_page(context))
}

/// POST /waitlist/dialogs - Open a dialog and return its fragment.
pub async fn open_dialog(State(state): State<AppState>) -> Result<Html<String>, DialogError> {
    let snapshot = state.waitlist.open().await?;
    Ok(Html(render_dialog(snapshot)))
}

/// GET /waitlist/dialogs/{id} - Current fragment, empty once closed.
pub async fn dialog_fragment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Html<String> {
    match state.waitlist.snapshot(id).await {
        Ok(snapshot) => Html(render_dialog(snapshot)),
        Err(_) => Html(String::new()),
    }
}

/// POST /waitlist/dialogs/{id}/submit - Submit the email field.
pub async fn submit_dialog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, DialogError> {
    match state.waitlist.submit(id, &form.email).await {
        Ok(snapshot) => Ok(Html(render_dialog(snapshot))),
        Err(DialogError::NotFound(_)) => Ok(Html(String::new())),
        Err(e) => Err(e),
    }
}

/// PATCH /waitlist/dialogs/{id}/input - Field edited; returns the error slot.
pub async fn edit_dialog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, DialogError> {
    match state.waitlist.edit(id, &form.email).await {
        Ok(snapshot) => Ok(Html(render_field_error(&snapshot))),
        Err(DialogError::NotFound(_)) => Ok(Html(String::new())),
        Err(e) => Err(e),
    }
}

/// DELETE /waitlist/dialogs/{id} - Close the dialog.
pub async fn close_dialog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, DialogError> {
    match state.waitlist.close(id).await {
        // Closing an already-closed dialog is a no-op for the page.
        Ok(()) | Err(DialogError::NotFound(_)) => Ok(Html(String::new())),
        Err(e) => Err(e),
    }
}

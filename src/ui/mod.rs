//! Server-rendered views.
//!
//! Leptos components rendered to HTML strings on the server. Interactivity
//! comes from HTMX attributes on the markup, not from hydration.
//!
//! # Structure
//!
//! - [`page`]: document shell
//! - [`landing`]: hero, features, visualization and footer sections
//! - [`dialog`]: the signup dialog fragment
//! - [`components`]: shared primitives

pub mod components;
pub mod dialog;
pub mod landing;
pub mod page;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::waitlist::DialogSnapshot;
use components::FieldError;
use dialog::WaitlistDialog;
use page::LandingPage;
pub use page::{DIALOG_MOUNT_ID, PageContext};

/// Render the complete landing page.
#[must_use]
pub fn render_page(context: PageContext) -> String {
    let html = Owner::new().with(|| view! { <LandingPage context=context /> }.to_html());
    format!("<!DOCTYPE html>{html}")
}

/// Render the dialog fragment for HTMX swaps.
#[must_use]
pub fn render_dialog(snapshot: DialogSnapshot) -> String {
    Owner::new().with(|| view! { <WaitlistDialog snapshot=snapshot /> }.to_html())
}

/// Render only the email field's error slot, after an edit.
#[must_use]
pub fn render_field_error(snapshot: &DialogSnapshot) -> String {
    let message = snapshot.message.clone();
    Owner::new().with(|| view! { <FieldError id="email-error" message=message /> }.to_html())
}

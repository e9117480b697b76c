//! DeadW3 landing site
//!
//! A single-page marketing site for the DeadW3 archive with a waitlist
//! signup dialog. Pages are rendered on the server and the dialog is driven
//! by HTMX fragment swaps.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving the page, dialog fragments and a JSON API
//! - **UI**: Leptos SSR components + HTMX
//! - **Waitlist**: email validation, an append-only store over pluggable
//!   storage, and a cancellable dialog lifecycle
//!
//! # Modules
//!
//! - [`waitlist`]: validation, storage, dialog state machine and service
//! - [`session`]: registry of open dialogs
//! - [`ui`]: server-rendered views
//! - [`api`]: HTTP handlers
//! - [`config`]: layered configuration

pub mod api;
pub mod config;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;
pub mod waitlist;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::waitlist::storage::WaitlistStorage;
use crate::waitlist::{WaitlistService, WaitlistStore};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dialog lifecycle and the waitlist behind it.
    pub waitlist: WaitlistService,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn WaitlistStorage>) -> Self {
        let waitlist = WaitlistService::with_limits(
            WaitlistStore::new(storage),
            config.dialog.timing(),
            config.dialog.limits(),
        );
        Self { waitlist, config }
    }
}

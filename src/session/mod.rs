//! Open signup dialog sessions.
//!
//! Sessions are transient: they exist from the moment a visitor opens the
//! dialog until it is closed by hand or auto-closes after an accepted
//! signup. Nothing here is persisted.
//!
//! # Example
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use deadw3_landing::session::DialogRegistry;
//! use deadw3_landing::waitlist::dialog::DialogSession;
//!
//! let registry = DialogRegistry::new();
//! let id = registry.insert(DialogSession::open()).await.unwrap();
//! assert!(registry.snapshot(id).await.is_some());
//!
//! registry.remove(id).await;
//! assert!(registry.is_empty().await);
//! # }
//! ```

mod registry;

pub use registry::{DEFAULT_IDLE_TTL, DEFAULT_MAX_OPEN, DialogEntry, DialogLimits, DialogRegistry};

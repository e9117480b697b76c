//! Waitlist signup: validation, storage, and the signup dialog lifecycle.
//!
//! - [`email`]: address validation
//! - [`store`]: the append-only waitlist and its persisted slot
//! - [`storage`]: pluggable key-value backends
//! - [`dialog`]: the dialog state machine
//! - [`service`]: timers, cancellation and commits

pub mod dialog;
pub mod email;
pub mod error;
pub mod service;
pub mod storage;
pub mod store;

pub use dialog::{DialogSnapshot, DialogState};
pub use email::{EmailAddress, is_valid_email, validate_email};
pub use error::{DialogError, SignupError, StorageError};
pub use service::{DialogTiming, WaitlistService};
pub use store::{Waitlist, WaitlistStore};

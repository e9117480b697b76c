//! Reusable UI components, rendered via Leptos SSR.
//!
//! - [`Button`]: themed button with variants
//! - [`Card`]: framed container with corner accents
//! - [`EmailField`]: labelled email input with inline error
//! - [`FieldError`]: swappable error slot under a field
//! - [`Badge`]: technology tag
//! - [`Separator`]: divider line
//! - [`icons`]: SVG icon components

mod badge;
mod button;
mod card;
mod icons;
mod input;
mod separator;

pub use badge::Badge;
pub use button::{Button, ButtonSize, ButtonVariant, button_classes};
pub use card::Card;
pub use icons::*;
pub use input::{EmailField, FieldError};
pub use separator::Separator;

//! Horizontal rule.

use leptos::prelude::*;

/// Thin divider line.
#[component]
pub fn Separator(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let classes = format!("border-t border-deadw3-gray {class}");

    view! { <div class=classes role="separator" /> }
}

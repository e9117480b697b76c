//! Framed card with corner accents.

use leptos::prelude::*;

/// Dark card with accent corners, used by the feature grid and the dialog.
#[component]
pub fn Card(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Colour class for the corner accents.
    #[prop(default = "border-deadw3-purple")]
    accent: &'static str,
    /// Card content.
    children: Children,
) -> impl IntoView {
    let classes = format!("relative p-8 overflow-hidden {class}");
    let corner = |position: &str| format!("absolute {position} w-4 h-4 {accent}");

    view! {
        <div class=classes>
            <div class={corner("top-0 left-0 border-t-2 border-l-2")} />
            <div class={corner("top-0 right-0 border-t-2 border-r-2")} />
            <div class={corner("bottom-0 left-0 border-b-2 border-l-2")} />
            <div class={corner("bottom-0 right-0 border-b-2 border-r-2")} />
            {children()}
        </div>
    }
}

//! Badge component for technology tags.

use leptos::prelude::*;

/// Small outlined tag.
///
/// # Example
///
/// ```rust,ignore
/// view! { <Badge>"IPFS"</Badge> }
/// ```
#[component]
pub fn Badge(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Badge content.
    children: Children,
) -> impl IntoView {
    let base_classes = "px-3 py-1 text-xs font-mono text-gray-400 border border-deadw3-gray \
                        hover:border-deadw3-purple transition-colors";

    let classes = format!("{base_classes} {class}");

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}

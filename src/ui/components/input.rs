//! Labelled email field.

use leptos::prelude::*;

/// Email input with its label and optional inline error.
#[component]
pub fn EmailField(
    /// Input name and id.
    #[prop(default = "email")]
    name: &'static str,
    /// Label text.
    #[prop(default = "Email Address")]
    label: &'static str,
    /// Current value.
    #[prop(into)]
    value: String,
    /// Inline error text, if any.
    #[prop(default = None)]
    error: Option<String>,
    /// Whether the input is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Where edits are sent so a shown error can be cleared.
    #[prop(default = None)]
    edit_url: Option<String>,
) -> impl IntoView {
    let base_classes = "w-full px-4 py-3 bg-deadw3-dark border text-gray-100 font-mono \
                        focus:border-deadw3-purple focus:outline-none transition-colors";
    let border = if error.is_some() {
        "border-red-400"
    } else {
        "border-deadw3-gray"
    };
    let classes = format!("{base_classes} {border}");
    let error_id = format!("{name}-error");
    let edit_target = edit_url.as_ref().map(|_| format!("#{error_id}"));

    view! {
        <div>
            <label for=name class="block text-sm font-mono text-gray-300 mb-2">
                {label}
            </label>
            <input
                type="email"
                id=name
                name=name
                class=classes
                placeholder="your@email.com"
                value=value
                disabled=disabled
                autocomplete="email"
                hx-patch=edit_url
                hx-trigger="input changed delay:200ms"
                hx-target=edit_target
                hx-swap="outerHTML"
            />
            <FieldError id=error_id message=error />
        </div>
    }
}

/// Inline error slot under a field. Always rendered so edits can swap it.
#[component]
pub fn FieldError(
    /// Element id the edit response targets.
    #[prop(into)]
    id: String,
    #[prop(default = None)]
    message: Option<String>,
) -> impl IntoView {
    let class = if message.is_some() {
        "field-error mt-2 text-red-400 text-sm font-mono"
    } else {
        "field-error hidden"
    };

    view! {
        <p id=id class=class role="alert">
            {message}
        </p>
    }
}

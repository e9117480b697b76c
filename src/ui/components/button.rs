//! Button component with variants and sizes.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Purple fill with amber text; the dialog's submit action.
    #[default]
    Primary,
    /// Charcoal fill framed in purple; the hero call-to-action.
    Outline,
    /// Borderless icon button (dialog close).
    Ghost,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-deadw3-purple text-deadw3-amber hover:bg-opacity-80",
            Self::Outline => {
                "bg-deadw3-charcoal border-2 border-deadw3-purple text-deadw3-amber \
                 hover:border-deadw3-amber"
            }
            Self::Ghost => "bg-transparent text-gray-400 hover:text-deadw3-amber",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Full-width form button.
    #[default]
    Block,
    /// Large hero button.
    Lg,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Block => "w-full py-3",
            Self::Lg => "px-8 py-4 text-lg",
            Self::Icon => "h-6 w-6",
        }
    }
}

/// Shared class list for anything rendered as a button.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: ButtonSize, extra: &str) -> String {
    let base_classes = "relative inline-flex items-center justify-center font-mono font-semibold \
                        transition-all disabled:opacity-50 disabled:cursor-not-allowed";
    format!("{base_classes} {} {} {extra}", variant.classes(), size.classes())
}

/// Themed button.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button button_type="submit" disabled=submitting>
///         "Join Waitlist"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Block)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = button_classes(variant, size, class);

    view! {
        <button type=button_type class=classes disabled=disabled>
            {children()}
        </button>
    }
}

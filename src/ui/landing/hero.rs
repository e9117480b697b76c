//! Hero banner with the waitlist call-to-action.

use leptos::prelude::*;

use crate::ui::components::{ButtonSize, ButtonVariant, button_classes};

/// Decorative particles drifting over the hero background.
const PARTICLE_COUNT: usize = 20;

/// Spread `n` points over the unit square with the golden-ratio sequence, so
/// the particle layout is stable between renders.
fn particle_positions(n: usize) -> Vec<(f64, f64)> {
    const PHI: f64 = 0.618_033_988_75;
    (1..=n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            ((i * PHI).fract() * 100.0, (i * PHI * PHI).fract() * 100.0)
        })
        .collect()
}

/// Full-height hero section.
///
/// The CTA asks the server for a new signup dialog and swaps it into
/// `dialog_target`.
#[component]
pub fn Hero(
    /// CSS selector of the dialog mount point.
    #[prop(default = "#waitlist-dialog")]
    dialog_target: &'static str,
) -> impl IntoView {
    let particles = particle_positions(PARTICLE_COUNT)
        .into_iter()
        .map(|(left, top)| {
            let style = format!("left: {left:.1}%; top: {top:.1}%");
            view! { <div class="particle absolute w-1 h-1 bg-deadw3-amber rounded-full opacity-30" style=style /> }
        })
        .collect_view();

    let cta_classes = button_classes(ButtonVariant::Outline, ButtonSize::Lg, "rounded-none overflow-hidden");

    view! {
        <section id="hero" class="relative min-h-screen flex items-center justify-center overflow-hidden">
            <div class="absolute inset-0 bg-gradient-to-br from-deadw3-dark via-deadw3-charcoal to-deadw3-blue opacity-50" />
            <div class="absolute inset-0">{particles}</div>
            <div class="hero-grid absolute inset-0 opacity-10" />

            <div class="relative z-10 text-center px-4 max-w-5xl mx-auto">
                <h1 class="font-mono text-7xl md:text-9xl font-bold mb-6 glitch-text glow-amber" data-text="DeadW3">
                    "DeadW3"
                </h1>
                <p class="text-xl md:text-3xl text-deadw3-amber mb-4 font-light tracking-wide">
                    "Before it vanishes. Forever."
                </p>
                <p class="text-sm md:text-lg text-gray-400 mb-12 max-w-2xl mx-auto font-light italic">
                    "Preserving what was never meant to last."
                </p>

                <button
                    type="button"
                    id="join-waitlist"
                    class=cta_classes
                    hx-post="/waitlist/dialogs"
                    hx-target=dialog_target
                    hx-swap="innerHTML"
                >
                    <span class="relative z-10">"Join the Waitlist"</span>
                </button>
            </div>

            <div class="absolute bottom-0 left-0 right-0 h-32 bg-gradient-to-t from-deadw3-dark to-transparent" />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_stay_in_bounds() {
        let positions = particle_positions(PARTICLE_COUNT);
        assert_eq!(positions.len(), PARTICLE_COUNT);
        for (x, y) in positions {
            assert!((0.0..100.0).contains(&x));
            assert!((0.0..100.0).contains(&y));
        }
    }
}

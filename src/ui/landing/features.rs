//! Three-up feature grid.

use leptos::prelude::*;

use crate::ui::components::Card;

/// One feature tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Permanent Storage",
        description: "What disappears doesn't have to be forgotten",
        icon: "∞",
    },
    Feature {
        title: "Community Verified",
        description: "Truth through consensus, preserved through cryptography",
        icon: "◈",
    },
    Feature {
        title: "Incentivized Archive",
        description: "Reward preservation, penalize deception",
        icon: "⟠",
    },
];

#[component]
pub fn Features() -> impl IntoView {
    view! {
        <section id="features" class="relative py-24 px-4 bg-deadw3-charcoal">
            <div class="dot-grid absolute inset-0 opacity-5" />
            <div class="relative z-10 max-w-7xl mx-auto grid grid-cols-1 md:grid-cols-3 gap-12">
                {FEATURES.into_iter().map(|feature| view! { <FeatureCard feature=feature /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn FeatureCard(feature: Feature) -> impl IntoView {
    view! {
        <article class="feature group relative">
            <Card class="bg-deadw3-dark border border-deadw3-gray hover:border-deadw3-purple">
                <div class="relative z-10">
                    <div class="text-6xl font-mono text-deadw3-amber mb-6 glow-amber">{feature.icon}</div>
                    <h3 class="text-2xl font-mono font-bold text-deadw3-amber mb-4 tracking-wide">
                        {feature.title}
                    </h3>
                    <p class="text-gray-400 leading-relaxed font-light italic">{feature.description}</p>
                </div>
            </Card>
        </article>
    }
}

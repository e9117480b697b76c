//! Site footer.

use leptos::prelude::*;

use crate::ui::components::{Badge, BrandIcon, Separator, SocialIcon};

const SOCIAL_LINKS: [(&str, &str, SocialIcon); 3] = [
    ("GitHub", "https://github.com/deadw3", SocialIcon::GitHub),
    ("Twitter", "https://twitter.com/deadw3", SocialIcon::X),
    ("Discord", "https://discord.gg/deadw3", SocialIcon::Discord),
];

const TECH_BADGES: [&str; 3] = ["Built on Arweave", "Base", "IPFS"];

#[component]
pub fn Footer(
    /// Year shown in the copyright line.
    current_year: i32,
) -> impl IntoView {
    let socials = SOCIAL_LINKS
        .into_iter()
        .map(|(name, url, icon)| {
            view! {
                <a
                    href=url
                    target="_blank"
                    rel="noopener noreferrer"
                    class="text-gray-400 hover:text-deadw3-amber transition-colors"
                    aria-label=name
                >
                    <BrandIcon icon=icon />
                </a>
            }
        })
        .collect_view();

    let badges = TECH_BADGES
        .into_iter()
        .map(|badge| view! { <Badge>{badge}</Badge> })
        .collect_view();

    view! {
        <footer class="relative bg-deadw3-charcoal border-t border-deadw3-gray py-12 px-4">
            <div class="relative z-10 max-w-7xl mx-auto">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8 items-center">
                    <div class="text-center md:text-left">
                        <h3 class="font-mono text-2xl font-bold text-deadw3-amber glow-amber mb-2">"DeadW3"</h3>
                        <p class="text-gray-500 text-sm font-mono">"Preserving ephemeral culture"</p>
                    </div>
                    <div class="flex justify-center space-x-6">{socials}</div>
                    <div class="flex flex-wrap justify-center md:justify-end gap-2">{badges}</div>
                </div>

                <Separator class="my-8" />

                <div class="flex flex-col md:flex-row justify-between items-center text-sm text-gray-500 font-mono">
                    <p>"© " {current_year} " DeadW3 Protocol. All rights reserved."</p>
                    <div class="flex space-x-6">
                        <a href="#" class="hover:text-deadw3-amber transition-colors">"Privacy Policy"</a>
                        <a href="#" class="hover:text-deadw3-amber transition-colors">"Terms of Service"</a>
                    </div>
                </div>

                <p class="mt-8 text-center text-xs text-gray-700 font-mono">"[ The archive remembers ]"</p>
            </div>
        </footer>
    }
}

//! Decorative archive network: a ring of nodes around a central vault.

use std::f64::consts::TAU;

use leptos::prelude::*;

pub const NODE_COUNT: usize = 12;

/// Ring radius in SVG user units (the viewBox is 100x100).
pub const RING_RADIUS: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkNode {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Stagger for the entrance animation, in seconds.
    pub delay: f64,
}

/// Nodes evenly spaced on the ring, starting at 3 o'clock.
#[must_use]
pub fn network_nodes() -> Vec<NetworkNode> {
    (0..NODE_COUNT)
        .map(|id| {
            #[allow(clippy::cast_precision_loss)]
            let (step, count) = (id as f64, NODE_COUNT as f64);
            let angle = step * TAU / count;
            NetworkNode {
                id,
                x: 50.0 + angle.cos() * RING_RADIUS,
                y: 50.0 + angle.sin() * RING_RADIUS,
                delay: step * 0.1,
            }
        })
        .collect()
}

/// Edges as node-index pairs: each node to its clockwise neighbour, plus
/// every even node across the ring.
#[must_use]
pub fn network_links(node_count: usize) -> Vec<(usize, usize)> {
    let mut links = Vec::with_capacity(node_count + node_count / 2);
    for i in 0..node_count {
        links.push((i, (i + 1) % node_count));
        if i % 2 == 0 {
            links.push((i, (i + node_count / 2) % node_count));
        }
    }
    links
}

#[component]
pub fn Visualization() -> impl IntoView {
    let nodes = network_nodes();

    let lines = network_links(nodes.len())
        .into_iter()
        .map(|(from, to)| {
            let (a, b) = (nodes[from], nodes[to]);
            view! {
                <line
                    x1={format!("{:.2}", a.x)}
                    y1={format!("{:.2}", a.y)}
                    x2={format!("{:.2}", b.x)}
                    y2={format!("{:.2}", b.y)}
                    stroke="#6b46c1"
                    stroke-width="0.3"
                    opacity="0.6"
                />
            }
        })
        .collect_view();

    let dots = nodes
        .iter()
        .map(|node| {
            view! {
                <circle
                    class="network-node"
                    cx={format!("{:.2}", node.x)}
                    cy={format!("{:.2}", node.y)}
                    r="2"
                    fill="#d4a574"
                    style={format!("animation-delay: {:.1}s", node.delay)}
                />
            }
        })
        .collect_view();

    view! {
        <section id="archive" class="relative py-32 px-4 bg-deadw3-dark overflow-hidden">
            <div class="relative z-10 max-w-6xl mx-auto">
                <div class="text-center mb-16">
                    <h2 class="text-4xl md:text-5xl font-psychedelic font-bold text-gd-red mb-4 glow-gd-red">
                        "The Archive Lives Forever"
                    </h2>
                    <p class="text-gray-400 text-lg font-light italic max-w-2xl mx-auto">
                        "Ephemeral moments flowing into an immutable, decentralized vault"
                    </p>
                </div>

                <div class="relative w-full max-w-2xl mx-auto aspect-square">
                    <svg class="network absolute inset-0 w-full h-full" viewBox="0 0 100 100" aria-hidden="true">
                        <g class="links">{lines}</g>
                        <g class="nodes">{dots}</g>
                        <g class="vault">
                            <circle cx="50" cy="50" r="12" fill="none" stroke="#253387" stroke-width="1" />
                            <path d="M 50,50 m -10,0 a 10,10 0 0,1 10,-10 L 50,50 Z" fill="#253387" />
                            <path d="M 50,50 m 0,-10 a 10,10 0 0,1 10,10 L 50,50 Z" fill="#c92d25" />
                            <path d="M 50,50 m 10,0 a 10,10 0 0,1 -20,0 Z" fill="#ffffff" opacity="0.85" />
                        </g>
                    </svg>
                </div>
            </div>
        </section>
    }
}

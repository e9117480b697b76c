//! Full landing page document.

use leptos::prelude::*;

use super::landing::{Features, Footer, Hero, Visualization};

/// Id of the element the signup dialog is swapped into.
pub const DIALOG_MOUNT_ID: &str = "waitlist-dialog";

/// Page-level inputs that vary per deployment or per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub current_year: i32,
    /// Emitted as a meta tag when analytics is enabled.
    pub analytics_id: Option<String>,
}

#[component]
pub fn LandingPage(context: PageContext) -> impl IntoView {
    let analytics = context
        .analytics_id
        .map(|id| view! { <meta name="analytics-id" content=id /> });

    view! {
        <html lang="en" class="dark">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content="DeadW3: preserving what was never meant to last." />
                {analytics}
                <title>"DeadW3 - Before it vanishes. Forever."</title>

                // Local assets only (no CDN)
                <script src="/static/vendor/htmx-2.0.8.min.js"></script>
                <link rel="stylesheet" href="/static/app.css" />
            </head>

            <body class="min-h-screen bg-deadw3-dark text-gray-100 antialiased">
                <Hero />
                <Features />
                <Visualization />
                <Footer current_year=context.current_year />
                <div id=DIALOG_MOUNT_ID></div>
            </body>
        </html>
    }
}

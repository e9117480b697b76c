//! Signup dialog fragment.
//!
//! The server re-renders this fragment after every interaction and HTMX
//! swaps it into the page's dialog mount point. While a submission is in
//! flight, or the success message is showing, the fragment polls its own
//! URL; once the dialog is gone the poll returns an empty body and the
//! modal disappears.

use leptos::prelude::*;

use crate::ui::components::{
    Button, ButtonSize, ButtonVariant, Card, CloseIcon, EmailField, LoaderIcon, button_classes,
};
use crate::waitlist::{DialogSnapshot, DialogState};

/// Poll interval while the fragment waits on the server.
const POLL_TRIGGER: &str = "every 250ms";

#[component]
pub fn WaitlistDialog(
    /// Dialog to render.
    snapshot: DialogSnapshot,
    /// CSS selector of the mount point this fragment is swapped into.
    #[prop(default = "#waitlist-dialog")]
    target: &'static str,
) -> impl IntoView {
    let url = format!("/waitlist/dialogs/{}", snapshot.id);
    let submitting = snapshot.state == DialogState::Submitting;
    let accepted = snapshot.state == DialogState::Accepted;

    let poller = (submitting || accepted).then(|| {
        view! {
            <div
                class="dialog-poll hidden"
                hx-get={url.clone()}
                hx-trigger=POLL_TRIGGER
                hx-target=target
                hx-swap="innerHTML"
            />
        }
    });

    let body = if accepted {
        view! { <SignupSuccess /> }.into_any()
    } else {
        view! {
            <SignupForm
                submit_url={format!("{url}/submit")}
                edit_url={format!("{url}/input")}
                input={snapshot.input.clone()}
                error={snapshot.message.clone()}
                submitting=submitting
                target=target
            />
        }
        .into_any()
    };

    view! {
        <div class="waitlist-dialog" data-dialog-id={snapshot.id.to_string()} data-state={snapshot.state.name()}>
            <div
                class="fixed inset-0 bg-black/80 backdrop-blur-sm z-40"
                hx-delete={url.clone()}
                hx-trigger="click"
                hx-target=target
                hx-swap="innerHTML"
            />
            <div class="fixed top-1/2 left-1/2 -translate-x-1/2 -translate-y-1/2 z-50 w-full max-w-md mx-4" role="dialog" aria-modal="true">
                <Card class="bg-deadw3-charcoal border-2 border-deadw3-purple" accent="border-deadw3-amber">
                    <button
                        type="button"
                        class={button_classes(ButtonVariant::Ghost, ButtonSize::Icon, "dialog-close absolute top-4 right-4")}
                        aria-label="Close modal"
                        hx-delete={url.clone()}
                        hx-target=target
                        hx-swap="innerHTML"
                    >
                        <CloseIcon />
                    </button>
                    {body}
                    {poller}
                </Card>
            </div>
        </div>
    }
}

#[component]
fn SignupForm(
    submit_url: String,
    edit_url: String,
    input: String,
    error: Option<String>,
    submitting: bool,
    target: &'static str,
) -> impl IntoView {
    let label = if submitting { "Joining..." } else { "Join Waitlist" };

    view! {
        <div class="mb-6">
            <h2 class="text-3xl font-mono font-bold text-deadw3-amber mb-2 glow-amber">"Join the Archive"</h2>
            <p class="text-gray-400 text-sm font-light italic">"Be among the first to preserve what matters"</p>
        </div>

        <form class="space-y-4" hx-post=submit_url hx-target=target hx-swap="innerHTML">
            <EmailField value=input error=error disabled=submitting edit_url=Some(edit_url) />
            <Button button_type="submit" variant=ButtonVariant::Primary size=ButtonSize::Block disabled=submitting>
                {submitting.then(|| view! { <LoaderIcon class="mr-2" /> })}
                <span class="relative z-10">{label}</span>
            </Button>
        </form>

        <p class="mt-4 text-xs text-gray-500 text-center font-mono">"We respect your privacy. No spam, ever."</p>
    }
}

#[component]
fn SignupSuccess() -> impl IntoView {
    view! {
        <div class="signup-success text-center py-8">
            <div class="text-6xl mb-4">"✓"</div>
            <h3 class="text-2xl font-mono font-bold text-deadw3-amber mb-2">"Welcome to the Archive"</h3>
            <p class="text-gray-400 font-light">"You're on the list. We'll be in touch."</p>
        </div>
    }
}

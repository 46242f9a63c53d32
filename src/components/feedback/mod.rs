//! Shared loading and error views.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/feedback/feedback.module.css");

/// Spinner shown while a page has no data yet.
#[component]
pub fn Loading(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class=css::loading role="status">
            <span class=css::spinner></span>
            <span>{label}</span>
        </div>
    }
}

/// Error message with a retry button, rendered in place of page content.
#[component]
pub fn ErrorPanel(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class=css::error role="alert">
            <p class=css::errorTitle>"Could not load data"</p>
            <p class=css::errorMessage>{message}</p>
            {on_retry.map(|retry| view! {
                <button class=css::retry on:click=move |_| retry.run(())>
                    <Icon icon=ic::REFRESH />
                    <span>"Try again"</span>
                </button>
            })}
        </div>
    }
}

/// Fallback of the per-page error boundary.
#[component]
pub fn PageFailure(#[prop(into)] messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <div class=css::error role="alert">
            <p class=css::errorTitle>"This page failed to render"</p>
            <ul class=css::errorList>
                {move || messages
                    .get()
                    .into_iter()
                    .map(|message| view! { <li>{message}</li> })
                    .collect::<Vec<_>>()
                }
            </ul>
        </div>
    }
}

/// Placeholder for empty lists.
#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class=css::empty>{message}</div> }
}

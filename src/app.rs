//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::AppRouter;
use crate::core::{BrowserClock, EmployeeApi, Location, Navigator, QueryClient, QueryClientConfig};

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **Query client**: the one data cache every page reads through
/// - **Navigator**: owner of the current location
/// - **Location**: reactive mirror of the navigator, updated by its listener
///
/// The query client and navigator are single-threaded (`Rc`) and live in
/// local arena storage, which keeps this struct `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Shared data cache.
    pub query: StoredValue<QueryClient, LocalStorage>,

    /// Location owner; all navigation goes through it.
    pub navigator: StoredValue<Navigator, LocalStorage>,

    /// Backend client.
    pub api: EmployeeApi,

    /// Current location, kept in sync with the navigator.
    pub location: RwSignal<Location>,
}

impl AppContext {
    /// Creates the application context.
    ///
    /// The query client is constructed first so it exists before any page
    /// (or the router) can be rendered.
    pub fn new() -> Self {
        let query = QueryClient::new(QueryClientConfig::default(), Rc::new(BrowserClock));
        let navigator = Navigator::browser();
        let location = RwSignal::new(navigator.location());

        Self {
            query: StoredValue::new_local(query),
            navigator: StoredValue::new_local(navigator),
            api: EmployeeApi::default(),
            location,
        }
    }

    /// Handle to the shared query client.
    pub fn client(&self) -> QueryClient {
        self.query.get_value()
    }

    /// Navigate to `path` with a new history entry.
    pub fn navigate(&self, path: &str) {
        self.navigator.with_value(|nav| nav.navigate(path));
    }

    /// Redirect to `path` without a history entry.
    pub fn replace(&self, path: &str) {
        self.navigator.with_value(|nav| nav.replace(path));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext (query client first)
/// - Mirrors navigator changes into the location signal
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let location = ctx.location;
    let subscription = ctx
        .navigator
        .with_value(|nav| nav.subscribe(move |loc| location.set(loc.clone())));
    // Lives as long as the root owner.
    let _subscription = StoredValue::new_local(subscription);

    log::info!("staffdesk started at {}", ctx.location.get_untracked().path);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f5f6fa;
                    color: #2c3e50;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #e74c3c; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #7f8c8d; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #ffffff;
                            padding: 1rem;
                            border-radius: 4px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #7f8c8d;">
                                "Error details"
                            </summary>
                            <ul style="margin: 1rem 0 0 0; padding-left: 1.5rem; color: #e74c3c;">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #3498db;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}

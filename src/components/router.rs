//! Application router component.
//!
//! Handles path-based routing on top of the [`Navigator`](crate::core::Navigator).
//!
//! # Architecture
//!
//! - **The navigator owns the location**: components only issue intents
//! - **Layout never re-renders on navigation**: only the page slot changes
//! - **popstate events**: browser back/forward re-sync the navigator
//! - **Per-page error boundary**: a failing page leaves the sidebar intact

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::feedback::PageFailure;
use crate::components::layout::Layout;
use crate::config::HOTEL_NAME;
use crate::models::AppRoute;
use crate::pages::{
    AddEmployee, Dashboard, EditEmployee, EmployeeDetails, EmployeeList, NotFound, Statistics,
};
use crate::utils::dom;

/// Main application router.
///
/// Route table:
/// - `/` → Dashboard
/// - `/employees` → EmployeeList
/// - `/employees/:id` → EmployeeDetails
/// - `/employees/add` → AddEmployee
/// - `/employees/edit/:id` → EditEmployee
/// - `/statistics` → Statistics
/// - anything else → NotFound
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Browser listeners (run once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let on_popstate = Closure::wrap(Box::new(move || {
            ctx.navigator.with_value(|nav| nav.sync_from_browser());
        }) as Box<dyn Fn()>);
        let on_focus = Closure::wrap(Box::new(move || {
            let refreshed = ctx.query.with_value(|client| client.on_window_focus());
            if refreshed > 0 {
                log::debug!("window focus: revalidating {} queries", refreshed);
            }
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
            let _ = window
                .add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
        }

        // Keep the closures alive for the lifetime of the app
        on_popstate.forget();
        on_focus.forget();
    }

    let route = Memo::new(move |_| ctx.location.with(|loc| loc.route.clone()));

    Effect::new(move |_| {
        let title = route.with(|r| r.title());
        dom::set_title(&format!("{} | {}", title, HOTEL_NAME));
    });

    view! {
        <Layout>
            {move || {
                let current = route.get();
                view! {
                    <ErrorBoundary fallback=|errors| {
                        let messages = Signal::derive(move || {
                            errors
                                .get()
                                .into_iter()
                                .map(|(_, e)| e.to_string())
                                .collect::<Vec<_>>()
                        });
                        view! { <PageFailure messages=messages /> }
                    }>
                        {render_page(current)}
                    </ErrorBoundary>
                }
            }}
        </Layout>
    }
}

fn render_page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <Dashboard /> }.into_any(),
        AppRoute::EmployeeList => view! { <EmployeeList /> }.into_any(),
        AppRoute::EmployeeDetails { id } => view! { <EmployeeDetails id=id /> }.into_any(),
        AppRoute::AddEmployee => view! { <AddEmployee /> }.into_any(),
        AppRoute::EditEmployee { id } => view! { <EditEmployee id=id /> }.into_any(),
        AppRoute::Statistics => view! { <Statistics /> }.into_any(),
        AppRoute::NotFound { path } => view! { <NotFound path=path /> }.into_any(),
    }
}

//! Fallback for paths outside the route table.

use leptos::prelude::*;

use crate::components::nav_link::NavLink;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn NotFound(path: String) -> impl IntoView {
    log::warn!("no route for {}", path);
    view! {
        <section class=css::notFound>
            <p class=css::notFoundCode>"404"</p>
            <h1 class=css::pageTitle>"Page not found"</h1>
            <p class=css::muted>{format!("Nothing lives at {}.", path)}</p>
            <NavLink href=AppRoute::Dashboard.to_path() class=css::primaryButton>
                "Back to Dashboard"
            </NavLink>
        </section>
    }
}

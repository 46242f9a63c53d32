//! Page frame: sidebar on the left, routed content on the right.

use leptos::prelude::*;

use crate::components::sidebar::Sidebar;

stylance::import_crate_style!(css, "src/components/layout/layout.module.css");

/// Application layout. The sidebar stays mounted across navigation.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class=css::layout>
            <Sidebar />
            <main class=css::content>{children()}</main>
        </div>
    }
}

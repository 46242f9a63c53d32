//! In-app links.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::app::AppContext;

/// Anchor that navigates through the [`Navigator`](crate::core::Navigator)
/// instead of reloading the page.
///
/// Modified clicks (new tab, new window) fall through to the browser.
#[component]
pub fn NavLink(
    #[prop(into)] href: String,
    #[prop(into, default = String::new())] class: String,
    #[prop(into, default = String::new())] title: String,
    children: Children,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let target = href.clone();

    let on_click = move |ev: MouseEvent| {
        if ev.default_prevented()
            || ev.button() != 0
            || ev.ctrl_key()
            || ev.meta_key()
            || ev.shift_key()
            || ev.alt_key()
        {
            return;
        }
        ev.prevent_default();
        ctx.navigate(&target);
    };

    view! {
        <a href=href class=class title=title on:click=on_click>
            {children()}
        </a>
    }
}

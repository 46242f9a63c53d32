//! Fixed navigation sidebar.
//!
//! Renders the menu from [`nav_items`] for the current location. Clicking an
//! entry issues a navigation intent; highlighting follows the location the
//! navigator reports back.

use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::use_media_query;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::nav_link::NavLink;
use crate::config::{
    COMPACT_SIDEBAR_QUERY, FOOTER_SUBTEXT, FOOTER_TEXT, HOTEL_NAME, HOTEL_SUBTITLE,
};
use crate::models::navigation::{NAV_SECTION_TITLE, nav_items};

stylance::import_crate_style!(css, "src/components/sidebar/sidebar.module.css");

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let compact = use_media_query(COMPACT_SIDEBAR_QUERY);

    let sidebar_class = move || {
        if compact.get() {
            format!("{} {}", css::sidebar, css::compact)
        } else {
            css::sidebar.to_string()
        }
    };

    let items = move || {
        let path = ctx.location.with(|loc| loc.path.clone());
        nav_items(&path)
            .into_iter()
            .map(|item| {
                let class = if item.active {
                    format!("{} {}", css::navItem, css::active)
                } else {
                    css::navItem.to_string()
                };
                view! {
                    <li>
                        <NavLink href=item.entry.path class=class title=item.entry.label>
                            <span class=css::navIcon>
                                <Icon icon=ic::nav_icon(item.entry.icon) />
                            </span>
                            <Show when=move || !compact.get()>
                                <span class=css::navLabel>{item.entry.label}</span>
                            </Show>
                        </NavLink>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <aside class=sidebar_class>
            <header class=css::header>
                <span class=css::logo>
                    <Icon icon=ic::HOTEL />
                </span>
                <Show when=move || !compact.get()>
                    <div class=css::brand>
                        <h1 class=css::name>{HOTEL_NAME}</h1>
                        <p class=css::subtitle>{HOTEL_SUBTITLE}</p>
                    </div>
                </Show>
            </header>

            <nav class=css::nav>
                <Show when=move || !compact.get()>
                    <h2 class=css::sectionTitle>{NAV_SECTION_TITLE}</h2>
                </Show>
                <ul class=css::navList>{items}</ul>
            </nav>

            <Show when=move || !compact.get()>
                <footer class=css::footer>
                    <p>{FOOTER_TEXT}</p>
                    <p class=css::footerSub>{FOOTER_SUBTEXT}</p>
                </footer>
            </Show>
        </aside>
    }
}

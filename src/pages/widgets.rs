//! Small building blocks shared by the pages.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::models::EmployeeStatus;

stylance::import_crate_style!(css, "src/pages/pages.module.css");

/// Title row with optional actions on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class=css::pageHeader>
            <div>
                <h1 class=css::pageTitle>{title}</h1>
                {subtitle.map(|text| view! { <p class=css::pageSubtitle>{text}</p> })}
            </div>
            <div class=css::actions>{children.map(|c| c())}</div>
        </div>
    }
}

/// Headline figure on the dashboard and statistics pages.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    icon: IconData,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class=css::statCard>
            <span class=css::statIcon>
                <Icon icon=icon />
            </span>
            <div>
                <p class=css::statLabel>{label}</p>
                <p class=css::statValue>{value}</p>
                {hint.map(|text| view! { <p class=css::statHint>{text}</p> })}
            </div>
        </div>
    }
}

/// Colored pill for an employment status.
#[component]
pub fn StatusBadge(status: EmployeeStatus) -> impl IntoView {
    let variant = match status {
        EmployeeStatus::Active => css::badgeActive,
        EmployeeStatus::Inactive => css::badgeInactive,
        EmployeeStatus::OnLeave => css::badgeOnLeave,
    };
    view! { <span class=format!("{} {}", css::badge, variant)>{status.label()}</span> }
}

/// Horizontal bar filled to `percent`.
#[component]
pub fn ShareBar(percent: f64) -> impl IntoView {
    let width = format!("width: {:.1}%", percent.clamp(0.0, 100.0));
    view! {
        <div class=css::bar>
            <div class=css::barFill style=width></div>
        </div>
    }
}

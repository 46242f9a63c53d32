//! Landing page: headline figures, recent hires and status breakdown.

use leptos::prelude::*;

use super::widgets::{PageHeader, ShareBar, StatCard, StatusBadge};
use crate::app::AppContext;
use crate::components::feedback::EmptyState;
use crate::components::icons as ic;
use crate::components::nav_link::NavLink;
use crate::components::query::use_query;
use crate::config::{HOTEL_NAME, RECENT_HIRES_LIMIT};
use crate::core::keys;
use crate::core::roster::{percent, recent_hires, status_breakdown};
use crate::models::{AppRoute, Employee, EmployeeStatistics};
use crate::utils::format::{format_currency, format_date, format_percent, humanize, initials};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;

    let stats = use_query(keys::statistics(), move || api.statistics());
    let employees = use_query(keys::employees(), move || api.list());

    view! {
        <section>
            <PageHeader title="Dashboard" subtitle=format!("Welcome to {} staff management", HOTEL_NAME)>
                <NavLink href=AppRoute::AddEmployee.to_path() class=css::primaryButton>
                    "Add Employee"
                </NavLink>
            </PageHeader>

            {move || stats.render(|s| view! { <SummaryCards stats=s /> })}

            <div class=css::columns>
                <div class=css::panel>
                    <h2 class=css::panelTitle>"Recent Hires"</h2>
                    {move || employees.render(|list| view! { <RecentHires employees=list /> })}
                </div>
                <div class=css::panel>
                    <h2 class=css::panelTitle>"Status Breakdown"</h2>
                    {move || employees.render(|list| view! { <StatusBreakdown employees=list /> })}
                </div>
            </div>
        </section>
    }
}

#[component]
fn SummaryCards(stats: EmployeeStatistics) -> impl IntoView {
    let active_share = percent(stats.active_employees, stats.total_employees);
    view! {
        <div class=css::cards>
            <StatCard label="Total Employees" value=stats.total_employees.to_string() icon=ic::USERS />
            <StatCard
                label="Active"
                value=stats.active_employees.to_string()
                icon=ic::BRIEFCASE
                hint=format!("{} of staff", format_percent(active_share))
            />
            <StatCard label="On Leave" value=stats.on_leave_employees.to_string() icon=ic::CALENDAR />
            <StatCard label="Average Salary" value=format_currency(stats.average_salary) icon=ic::SALARY />
        </div>
    }
}

#[component]
fn RecentHires(employees: Vec<Employee>) -> impl IntoView {
    let recent = recent_hires(&employees, RECENT_HIRES_LIMIT);
    if recent.is_empty() {
        return view! { <EmptyState message="No employees yet" /> }.into_any();
    }

    view! {
        <ul class=css::personList>
            {recent
                .into_iter()
                .map(|e| {
                    let href = AppRoute::EmployeeDetails { id: e.id }.to_path();
                    let name = e.full_name();
                    let role = format!("{} · {}", e.position, humanize(&e.department));
                    view! {
                        <li class=css::personRow>
                            <span class=css::avatar>{initials(&e.first_name, &e.last_name)}</span>
                            <div class=css::personInfo>
                                <NavLink href=href class=css::personName>{name}</NavLink>
                                <span class=css::muted>{role}</span>
                            </div>
                            <span class=css::muted>{format_date(e.hire_date)}</span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
    .into_any()
}

#[component]
fn StatusBreakdown(employees: Vec<Employee>) -> impl IntoView {
    let total = employees.len() as u64;
    view! {
        <ul class=css::breakdown>
            {status_breakdown(&employees)
                .into_iter()
                .map(|(status, count)| {
                    let share = percent(count as u64, total);
                    view! {
                        <li class=css::breakdownRow>
                            <StatusBadge status=status />
                            <ShareBar percent=share />
                            <span class=css::muted>
                                {format!("{} ({})", count, format_percent(share))}
                            </span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
}

//! Organisation-wide and per-department figures.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::widgets::{PageHeader, ShareBar, StatCard};
use crate::app::AppContext;
use crate::components::feedback::EmptyState;
use crate::components::icons as ic;
use crate::components::query::use_query;
use crate::core::keys;
use crate::core::roster::{department_share, percent};
use crate::models::{DepartmentStatistics, EmployeeStatistics};
use crate::utils::format::{format_currency, format_percent, humanize};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn Statistics() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;

    let overall = use_query(keys::statistics(), move || api.statistics());
    let departments = use_query(keys::department_statistics(), move || {
        api.department_statistics()
    });

    let refreshing = move || overall.fetching.get() || departments.fetching.get();

    view! {
        <section>
            <PageHeader title="Statistics" subtitle="Workforce and payroll overview">
                <button
                    class=css::secondaryButton
                    disabled=refreshing
                    on:click=move |_| {
                        overall.refetch();
                        departments.refetch();
                    }
                >
                    <Icon icon=ic::REFRESH />
                    <span>"Refresh"</span>
                </button>
            </PageHeader>

            {move || overall.render(|stats| view! { <Overview stats=stats /> })}

            <div class=css::panel>
                <h2 class=css::panelTitle>"By Department"</h2>
                {move || departments.render(|rows| view! { <DepartmentTable rows=rows /> })}
            </div>
        </section>
    }
}

#[component]
fn Overview(stats: EmployeeStatistics) -> impl IntoView {
    let total = stats.total_employees;
    let share = |count: u64| format!("{} of staff", format_percent(percent(count, total)));

    view! {
        <div class=css::cards>
            <StatCard label="Total Employees" value=total.to_string() icon=ic::USERS />
            <StatCard
                label="Active"
                value=stats.active_employees.to_string()
                icon=ic::BRIEFCASE
                hint=share(stats.active_employees)
            />
            <StatCard
                label="Inactive"
                value=stats.inactive_employees.to_string()
                icon=ic::USERS
                hint=share(stats.inactive_employees)
            />
            <StatCard
                label="On Leave"
                value=stats.on_leave_employees.to_string()
                icon=ic::CALENDAR
                hint=share(stats.on_leave_employees)
            />
        </div>
        <div class=css::cards>
            <StatCard label="Average Salary" value=format_currency(stats.average_salary) icon=ic::SALARY />
            <StatCard
                label="Total Salary Expense"
                value=format_currency(stats.total_salary_expense)
                icon=ic::SALARY
            />
        </div>
    }
}

#[component]
fn DepartmentTable(rows: Vec<DepartmentStatistics>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <EmptyState message="No department data yet" /> }.into_any();
    }

    let shares = department_share(&rows);
    let share_of = move |department: &str| {
        shares
            .iter()
            .find(|(name, _)| name == department)
            .map_or(0.0, |(_, share)| *share)
    };

    let mut rows = rows;
    rows.sort_by(|a, b| {
        b.employee_count
            .cmp(&a.employee_count)
            .then_with(|| a.department.cmp(&b.department))
    });

    view! {
        <table class=css::table>
            <thead>
                <tr>
                    <th>"Department"</th>
                    <th>"Employees"</th>
                    <th>"Active"</th>
                    <th>"Average Salary"</th>
                    <th>"Total Salary"</th>
                    <th>"Share of Staff"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let share = share_of(&row.department);
                        view! {
                            <tr>
                                <td>{humanize(&row.department)}</td>
                                <td>{row.employee_count}</td>
                                <td>{row.active_count}</td>
                                <td>{format_currency(row.average_salary)}</td>
                                <td>{format_currency(row.total_salary)}</td>
                                <td class=css::shareCell>
                                    <ShareBar percent=share />
                                    <span class=css::muted>{format_percent(share)}</span>
                                </td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}

//! Single employee: all fields, status change, edit and delete.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::widgets::{PageHeader, StatusBadge};
use crate::app::AppContext;
use crate::components::feedback::{ErrorPanel, Loading};
use crate::components::icons as ic;
use crate::components::nav_link::NavLink;
use crate::components::query::{QueryState, use_mutation, use_query};
use crate::core::keys;
use crate::models::{AppRoute, Employee, EmployeeId, EmployeeStatus};
use crate::utils::dom;
use crate::utils::format::{format_currency, format_date, humanize, initials};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn EmployeeDetails(id: EmployeeId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;

    let employee = use_query(keys::employee(id), move || api.get(id));

    view! {
        <section>
            <NavLink href=AppRoute::EmployeeList.to_path() class=css::backLink>
                <Icon icon=ic::ARROW_LEFT />
                <span>"Back to employees"</span>
            </NavLink>

            {move || match employee.state.get() {
                QueryState::Loading => view! { <Loading /> }.into_any(),
                QueryState::Ready(e) => view! { <EmployeeCard employee=e /> }.into_any(),
                QueryState::Failed(error) if error.is_not_found() => view! {
                    <MissingEmployee id=id />
                }
                .into_any(),
                QueryState::Failed(error) => view! {
                    <ErrorPanel
                        message=error.to_string()
                        on_retry=Callback::new(move |_: ()| employee.refetch())
                    />
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn EmployeeCard(employee: Employee) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;
    let id = employee.id;
    let name = employee.full_name();

    let status_change = use_mutation();
    let delete = use_mutation();
    let busy = move || status_change.pending.get() || delete.pending.get();

    let on_status = move |ev: leptos::ev::Event| {
        let Ok(status) = event_target_value(&ev).parse::<EmployeeStatus>() else {
            return;
        };
        log::info!("employee {}: status -> {}", id, status.as_str());
        status_change.run(api.update_status(id, status), |_| ());
    };

    let on_delete = {
        let name = name.clone();
        move |_: leptos::ev::MouseEvent| {
            if dom::confirm(&format!("Delete {}? This cannot be undone.", name)) {
                delete.run_removing(api.delete(id), keys::employee(id), move |_| {
                    ctx.replace(&AppRoute::EmployeeList.to_path());
                });
            }
        }
    };

    let current_status = employee.status;
    let edit_href = AppRoute::EditEmployee { id }.to_path();
    let subtitle = format!("{} · {}", employee.position, humanize(&employee.department));

    view! {
        <PageHeader title=name.clone() subtitle=subtitle>
            <NavLink href=edit_href class=css::secondaryButton>
                <Icon icon=ic::EDIT />
                <span>"Edit"</span>
            </NavLink>
            <button class=css::dangerButton disabled=busy on:click=on_delete>
                <Icon icon=ic::TRASH />
                <span>"Delete"</span>
            </button>
        </PageHeader>

        {move || {
            status_change
                .error
                .get()
                .or_else(|| delete.error.get())
                .map(|e| view! { <p class=css::formError>{e.to_string()}</p> })
        }}

        <div class=css::panel>
            <div class=css::profile>
                <span class=css::avatarLarge>
                    {initials(&employee.first_name, &employee.last_name)}
                </span>
                <div>
                    <h2 class=css::panelTitle>{name}</h2>
                    <StatusBadge status=current_status />
                </div>
                <label class=css::statusPicker>
                    <span class=css::muted>"Change status"</span>
                    <select class=css::select disabled=busy on:change=on_status>
                        {EmployeeStatus::ALL
                            .iter()
                            .map(|s| view! {
                                <option value=s.as_str() selected={*s == current_status}>
                                    {s.label()}
                                </option>
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
            </div>

            <dl class=css::details>
                <DetailRow icon=ic::MAIL label="Email" value=employee.email.clone() />
                <DetailRow icon=ic::PHONE label="Phone" value=employee.phone.clone() />
                <DetailRow icon=ic::BRIEFCASE label="Position" value=employee.position.clone() />
                <DetailRow icon=ic::USERS label="Department" value=humanize(&employee.department) />
                <DetailRow icon=ic::SALARY label="Salary" value=format_currency(employee.salary) />
                <DetailRow icon=ic::CALENDAR label="Hire Date" value=format_date(employee.hire_date) />
                <DetailRow
                    icon=ic::LOCATION
                    label="Address"
                    value=employee.address.clone().unwrap_or_else(|| "-".to_string())
                />
            </dl>
        </div>
    }
}

#[component]
fn DetailRow(icon: icondata::Icon, label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class=css::detailRow>
            <dt>
                <Icon icon=icon />
                <span>{label}</span>
            </dt>
            <dd>{value}</dd>
        </div>
    }
}

#[component]
fn MissingEmployee(id: EmployeeId) -> impl IntoView {
    view! {
        <div class=css::panel>
            <h2 class=css::panelTitle>"Employee not found"</h2>
            <p class=css::muted>{format!("No employee exists with id {}.", id)}</p>
            <NavLink href=AppRoute::EmployeeList.to_path() class=css::primaryButton>
                "View all employees"
            </NavLink>
        </div>
    }
}

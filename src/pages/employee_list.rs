//! All employees: search, filter, sort and delete.

use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::signal_debounced;

use super::widgets::{PageHeader, StatusBadge};
use crate::app::AppContext;
use crate::components::feedback::EmptyState;
use crate::components::icons as ic;
use crate::components::nav_link::NavLink;
use crate::components::query::{Mutation, QueryHandle, use_mutation, use_query};
use crate::config::{DEPARTMENTS, SEARCH_DEBOUNCE_MS};
use crate::core::EmployeeApi;
use crate::core::keys;
use crate::core::roster::{RosterFilter, SortKey};
use crate::models::{AppRoute, Employee, EmployeeStatus};
use crate::utils::dom;
use crate::utils::format::{format_currency, format_date, humanize};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn EmployeeList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;

    let employees = use_query(keys::employees(), move || api.list());
    let delete = use_mutation();

    let search = RwSignal::new(String::new());
    let department = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(SortKey::Name);
    let descending = RwSignal::new(false);

    // Non-empty terms are answered by the backend search endpoint.
    let debounced: Signal<String> = signal_debounced(search, SEARCH_DEBOUNCE_MS);
    let term = Memo::new(move |_| debounced.with(|t| t.trim().to_lowercase()));

    let filter = Memo::new(move |_| RosterFilter {
        search: search.get(),
        department: Some(department.get()).filter(|d| !d.is_empty()),
        status: status.get().parse::<EmployeeStatus>().ok(),
    });

    view! {
        <section>
            <PageHeader title="All Employees" subtitle="Browse and manage hotel staff">
                <button
                    class=css::secondaryButton
                    disabled=move || employees.fetching.get()
                    on:click=move |_| {
                        employees.refetch();
                        let current = term.get_untracked();
                        if !current.is_empty() {
                            ctx.client().invalidate_query(&keys::search(&current));
                        }
                    }
                >
                    <Icon icon=ic::REFRESH />
                    <span>"Refresh"</span>
                </button>
                <NavLink href=AppRoute::AddEmployee.to_path() class=css::primaryButton>
                    "Add Employee"
                </NavLink>
            </PageHeader>

            <div class=css::toolbar>
                <label class=css::searchBox>
                    <Icon icon=ic::SEARCH />
                    <input
                        type="search"
                        placeholder="Search by name"
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                </label>
                <select
                    class=css::select
                    prop:value=move || department.get()
                    on:change=move |ev| department.set(event_target_value(&ev))
                >
                    <option value="">"All departments"</option>
                    {DEPARTMENTS
                        .iter()
                        .map(|d| view! { <option value=*d>{humanize(d)}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <select
                    class=css::select
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="">"All statuses"</option>
                    {EmployeeStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <select
                    class=css::select
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| {
                        if let Some(key) = SortKey::parse(&event_target_value(&ev)) {
                            sort.set(key);
                        }
                    }
                >
                    {SortKey::ALL
                        .iter()
                        .map(|k| view! { <option value=k.as_str()>{format!("Sort by {}", k.label())}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <button class=css::secondaryButton on:click=move |_| descending.update(|d| *d = !*d)>
                    {move || if descending.get() { "Descending" } else { "Ascending" }}
                </button>
            </div>

            {move || {
                delete
                    .error
                    .get()
                    .map(|e| view! { <p class=css::formError>{format!("Delete failed: {}", e)}</p> })
            }}

            {move || {
                let current = term.get();
                if current.is_empty() {
                    view! {
                        <Roster
                            query=employees
                            filter=filter
                            sort=sort
                            descending=descending
                            api=api
                            delete=delete
                        />
                    }
                    .into_any()
                } else {
                    view! {
                        <SearchResults
                            term=current
                            filter=filter
                            sort=sort
                            descending=descending
                            api=api
                            delete=delete
                        />
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Backend search results for one term; replaced as soon as the term changes.
#[component]
fn SearchResults(
    term: String,
    filter: Memo<RosterFilter>,
    sort: RwSignal<SortKey>,
    descending: RwSignal<bool>,
    api: EmployeeApi,
    delete: Mutation,
) -> impl IntoView {
    let query = {
        let term = term.clone();
        use_query(keys::search(&term), move || api.search(term.clone()))
    };

    view! {
        <p class=css::muted>{format!("Results for \"{}\"", term)}</p>
        <Roster
            query=query
            filter=filter
            sort=sort
            descending=descending
            api=api
            delete=delete
        />
    }
}

#[component]
fn Roster(
    query: QueryHandle<Vec<Employee>>,
    filter: Memo<RosterFilter>,
    sort: RwSignal<SortKey>,
    descending: RwSignal<bool>,
    api: EmployeeApi,
    delete: Mutation,
) -> impl IntoView {
    move || {
        query.render(|list| {
            let rows = filter.with(|f| f.apply(&list, sort.get(), descending.get()));
            view! { <EmployeeTable rows=rows total=list.len() api=api delete=delete /> }
        })
    }
}

#[component]
fn EmployeeTable(
    rows: Vec<Employee>,
    total: usize,
    api: EmployeeApi,
    delete: Mutation,
) -> impl IntoView {
    if rows.is_empty() {
        let message = if total == 0 {
            "No employees found"
        } else {
            "No employees match the current filters"
        };
        return view! { <EmptyState message=message /> }.into_any();
    }

    let shown = rows.len();
    view! {
        <div class=css::panel>
            <table class=css::table>
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Position"</th>
                        <th>"Department"</th>
                        <th>"Salary"</th>
                        <th>"Hire Date"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|e| view! { <EmployeeRow employee=e api=api delete=delete /> })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
            <p class=css::tableFooter>{format!("Showing {} of {} employees", shown, total)}</p>
        </div>
    }
    .into_any()
}

#[component]
fn EmployeeRow(employee: Employee, api: EmployeeApi, delete: Mutation) -> impl IntoView {
    let id = employee.id;
    let name = employee.full_name();
    let details = AppRoute::EmployeeDetails { id }.to_path();
    let edit = AppRoute::EditEmployee { id }.to_path();

    let on_delete = {
        let name = name.clone();
        move |_: leptos::ev::MouseEvent| {
            if dom::confirm(&format!("Delete {}? This cannot be undone.", name)) {
                log::info!("deleting employee {}", id);
                delete.run_removing(api.delete(id), keys::employee(id), |_| ());
            }
        }
    };

    view! {
        <tr>
            <td>
                <NavLink href=details class=css::personName>{name}</NavLink>
            </td>
            <td>{employee.email}</td>
            <td>{employee.position}</td>
            <td>{humanize(&employee.department)}</td>
            <td>{format_currency(employee.salary)}</td>
            <td>{format_date(employee.hire_date)}</td>
            <td>
                <StatusBadge status=employee.status />
            </td>
            <td class=css::rowActions>
                <NavLink href=edit class=css::iconButton title="Edit">
                    <Icon icon=ic::EDIT />
                </NavLink>
                <button
                    class=css::iconButton
                    title="Delete"
                    disabled=move || delete.pending.get()
                    on:click=on_delete
                >
                    <Icon icon=ic::TRASH />
                </button>
            </td>
        </tr>
    }
}

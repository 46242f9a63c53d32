//! Creation form.

use leptos::prelude::*;

use super::employee_form::EmployeeForm;
use super::widgets::PageHeader;
use crate::app::AppContext;
use crate::components::query::use_mutation;
use crate::models::{AppRoute, Employee, EmployeeDraft, EmployeePayload};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn AddEmployee() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;
    let create = use_mutation();

    let on_submit = Callback::new(move |payload: EmployeePayload| {
        log::info!("creating employee {} {}", payload.first_name, payload.last_name);
        create.run(api.create(payload), move |employee: Employee| {
            ctx.replace(&AppRoute::EmployeeDetails { id: employee.id }.to_path());
        });
    });
    let on_cancel = Callback::new(move |_: ()| ctx.navigate(&AppRoute::EmployeeList.to_path()));

    view! {
        <section>
            <PageHeader title="Add Employee" subtitle="Register a new staff member" />
            <div class=css::panel>
                <EmployeeForm
                    initial=EmployeeDraft::new()
                    submit_label="Create Employee"
                    pending=create.pending
                    server_error=Signal::derive(move || create.error.get().map(|e| e.to_string()))
                    on_submit=on_submit
                    on_cancel=on_cancel
                />
            </div>
        </section>
    }
}

//! Edit form, prefilled from the cached record.

use leptos::prelude::*;

use super::employee_form::EmployeeForm;
use super::widgets::PageHeader;
use crate::app::AppContext;
use crate::components::query::{use_mutation, use_query};
use crate::core::keys;
use crate::models::{AppRoute, Employee, EmployeeDraft, EmployeeId, EmployeePayload};

stylance::import_crate_style!(css, "src/pages/pages.module.css");

#[component]
pub fn EditEmployee(id: EmployeeId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let api = ctx.api;

    let employee = use_query(keys::employee(id), move || api.get(id));
    let update = use_mutation();
    let details = AppRoute::EmployeeDetails { id }.to_path();

    let on_submit = Callback::new({
        let details = details.clone();
        move |payload: EmployeePayload| {
            log::info!("updating employee {}", id);
            let details = details.clone();
            update.run(api.update(id, payload), move |_: Employee| ctx.replace(&details));
        }
    });
    let on_cancel = Callback::new(move |_: ()| ctx.navigate(&details));

    view! {
        <section>
            <PageHeader title="Edit Employee" subtitle=format!("Employee #{}", id) />
            {move || employee.render(|e| view! {
                <div class=css::panel>
                    <EmployeeForm
                        initial=EmployeeDraft::from_employee(&e)
                        submit_label="Save Changes"
                        pending=update.pending
                        server_error=Signal::derive(move || update.error.get().map(|err| err.to_string()))
                        on_submit=on_submit
                        on_cancel=on_cancel
                    />
                </div>
            })}
        </section>
    }
}

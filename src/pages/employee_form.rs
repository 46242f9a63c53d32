//! Employee form shared by the add and edit pages.

use leptos::prelude::*;

use crate::config::DEPARTMENTS;
use crate::core::error::ValidationError;
use crate::models::{EmployeeDraft, EmployeePayload, EmployeeStatus};
use crate::utils::format::humanize;

stylance::import_crate_style!(css, "src/pages/pages.module.css");

/// Editable fields of [`EmployeeDraft`], in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Department,
    Salary,
    HireDate,
    Status,
    Address,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Position,
        Self::Department,
        Self::Salary,
        Self::HireDate,
        Self::Status,
        Self::Address,
    ];

    /// Label, identical to [`ValidationError::field`] for the same field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Position => "Position",
            Self::Department => "Department",
            Self::Salary => "Salary",
            Self::HireDate => "Hire date",
            Self::Status => "Status",
            Self::Address => "Address",
        }
    }

    fn input_type(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Salary => "number",
            Self::HireDate => "date",
            _ => "text",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Email => "name@hotel.com",
            Self::Phone => "10 digits",
            Self::Salary => "e.g. 45000",
            Self::Address => "Optional",
            _ => "",
        }
    }

    pub fn get<'a>(&self, draft: &'a EmployeeDraft) -> &'a str {
        match self {
            Self::FirstName => &draft.first_name,
            Self::LastName => &draft.last_name,
            Self::Email => &draft.email,
            Self::Phone => &draft.phone,
            Self::Position => &draft.position,
            Self::Department => &draft.department,
            Self::Salary => &draft.salary,
            Self::HireDate => &draft.hire_date,
            Self::Status => &draft.status,
            Self::Address => &draft.address,
        }
    }

    pub fn set(&self, draft: &mut EmployeeDraft, value: String) {
        let slot = match self {
            Self::FirstName => &mut draft.first_name,
            Self::LastName => &mut draft.last_name,
            Self::Email => &mut draft.email,
            Self::Phone => &mut draft.phone,
            Self::Position => &mut draft.position,
            Self::Department => &mut draft.department,
            Self::Salary => &mut draft.salary,
            Self::HireDate => &mut draft.hire_date,
            Self::Status => &mut draft.status,
            Self::Address => &mut draft.address,
        };
        *slot = value;
    }

    /// First validation message that belongs to this field.
    pub fn error_in(&self, errors: &[ValidationError]) -> Option<String> {
        errors
            .iter()
            .find(|e| e.field() == self.label())
            .map(ToString::to_string)
    }
}

/// Validated employee form.
///
/// `on_submit` only fires with a payload that passed validation; server-side
/// failures come back through `server_error`.
#[component]
pub fn EmployeeForm(
    initial: EmployeeDraft,
    #[prop(into)] submit_label: String,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] server_error: Signal<Option<String>>,
    on_submit: Callback<EmployeePayload>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let draft = RwSignal::new(initial);
    let errors = RwSignal::new(Vec::<ValidationError>::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match draft.with(|d| d.validate()) {
            Ok(payload) => {
                errors.set(Vec::new());
                on_submit.run(payload);
            }
            Err(found) => {
                log::debug!("form rejected: {} invalid fields", found.len());
                errors.set(found);
            }
        }
    };

    let fields = FormField::ALL
        .into_iter()
        .map(|field| view! { <FieldInput field=field draft=draft errors=errors /> })
        .collect::<Vec<_>>();

    view! {
        <form class=css::form on:submit=submit novalidate=true>
            {move || server_error.get().map(|msg| view! { <p class=css::formError>{msg}</p> })}

            <div class=css::formGrid>{fields}</div>

            <div class=css::formActions>
                <button
                    type="button"
                    class=css::secondaryButton
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button type="submit" class=css::primaryButton disabled=move || pending.get()>
                    {move || if pending.get() { "Saving...".to_string() } else { submit_label.clone() }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn FieldInput(
    field: FormField,
    draft: RwSignal<EmployeeDraft>,
    errors: RwSignal<Vec<ValidationError>>,
) -> impl IntoView {
    let value = move || draft.with(|d| field.get(d).to_string());
    let on_input = move |ev: leptos::ev::Event| {
        let next = event_target_value(&ev);
        draft.update(|d| field.set(d, next));
    };
    let error = move || errors.with(|e| field.error_in(e));

    let control = match field {
        FormField::Department => view! {
            <select class=css::select prop:value=value on:change=on_input>
                <option value="">"Select department"</option>
                {DEPARTMENTS
                    .iter()
                    .map(|d| view! { <option value=*d>{humanize(d)}</option> })
                    .collect::<Vec<_>>()}
            </select>
        }
        .into_any(),
        FormField::Status => view! {
            <select class=css::select prop:value=value on:change=on_input>
                {EmployeeStatus::ALL
                    .iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect::<Vec<_>>()}
            </select>
        }
        .into_any(),
        FormField::Address => view! {
            <textarea
                class=css::input
                rows="2"
                placeholder=field.placeholder()
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any(),
        _ => view! {
            <input
                class=css::input
                type=field.input_type()
                placeholder=field.placeholder()
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <label class=css::field>
            <span class=css::fieldLabel>{field.label()}</span>
            {control}
            {move || error().map(|msg| view! { <span class=css::fieldError>{msg}</span> })}
        </label>
    }
}

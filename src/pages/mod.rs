//! Routed pages, one per entry of the route table.
//!
//! Every page reads data through [`use_query`](crate::components::query::use_query)
//! and writes through [`use_mutation`](crate::components::query::use_mutation),
//! never touching the backend client's cache directly.

mod add_employee;
mod dashboard;
mod edit_employee;
mod employee_details;
mod employee_form;
mod employee_list;
mod not_found;
mod statistics;
mod widgets;

pub use add_employee::AddEmployee;
pub use dashboard::Dashboard;
pub use edit_employee::EditEmployee;
pub use employee_details::EmployeeDetails;
pub use employee_list::EmployeeList;
pub use not_found::NotFound;
pub use statistics::Statistics;

//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`AppRoute`] - Path-based route table
//! - [`NavEntry`], [`NavItem`] - Sidebar navigation model
//! - [`Employee`], [`EmployeeDraft`], [`EmployeeStatistics`] - Backend records and forms

mod employee;
pub mod navigation;
mod route;

pub use employee::{
    ApiResponse, DepartmentStatistics, Employee, EmployeeDraft, EmployeeId, EmployeePayload,
    EmployeeStatistics, EmployeeStatus,
};
pub use navigation::{NAV_ENTRIES, NavEntry, NavIcon, NavItem};
pub use route::{AppRoute, normalize_path};

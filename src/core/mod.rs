//! Core logic of the employee management front end, free of any UI code.
//!
//! This module provides:
//! - [`Navigator`] history-backed location with ordered dispatch
//! - [`QueryClient`] shared data cache with coalescing and retry
//! - [`EmployeeApi`] typed backend client and its cache [`keys`]
//! - [`roster`] client-side filtering, sorting and aggregation

pub mod api;
pub mod error;
pub mod navigator;
pub mod query;
pub mod roster;

pub use api::{EmployeeApi, keys};
pub use navigator::{BrowserHistory, HistoryBackend, Location, MemoryHistory, NavSubscription, Navigator};
pub use query::{BrowserClock, QueryClient, QueryClientConfig, QueryEvent, QueryKey, Subscription};

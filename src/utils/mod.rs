//! Utility modules for browser access, networking, and display formatting.
//!
//! Provides:
//! - [`dom`] - Window, history and document helpers
//! - [`fetch_api`], [`fetch_api_unit`] - JSON requests with envelope decoding
//! - [`format`] - Currency, date and label formatting

pub mod dom;
mod fetch;
pub mod format;

pub use fetch::{Method, decode_envelope, fetch_api, fetch_api_unit};

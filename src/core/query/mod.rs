//! Shared data cache for every page.
//!
//! - [`QueryClient`] - Request coalescing, retry, timeout and caching
//! - [`QueryKey`] - Hierarchical request identity
//! - [`Clock`] - Injected time source ([`BrowserClock`] in the app)

mod client;
mod clock;
mod key;

pub use client::{QueryClient, QueryClientConfig, QueryEvent, Subscription};
pub use clock::{BrowserClock, Clock};
pub use key::QueryKey;

#[cfg(test)]
pub(crate) use clock::ManualClock;

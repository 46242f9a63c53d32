//! UI components built with Leptos.
//!
//! - [`router`] - Application routing (main entry point)
//! - [`layout`] - Sidebar plus content frame
//! - [`sidebar`] - Navigation menu with exact-match highlighting
//! - [`nav_link`] - Anchors that navigate without reloading
//! - [`query`] - Signals bridged from the query client
//! - [`feedback`] - Loading, error and empty states
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod feedback;
pub mod icons;
pub mod layout;
pub mod nav_link;
pub mod query;
pub mod router;
pub mod sidebar;

pub use router::AppRouter;

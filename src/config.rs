//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! The backend base URL can be overridden at compile time with the
//! `STAFFDESK_API_URL` environment variable.

// =============================================================================
// Application Metadata
// =============================================================================

/// Hotel name displayed in the sidebar header.
pub const HOTEL_NAME: &str = "ආලකමන්දා";

/// Subtitle under the hotel name.
pub const HOTEL_SUBTITLE: &str = "Hotel Management";

/// Sidebar footer lines.
pub const FOOTER_TEXT: &str = "© 2026 ආලකමන්දා Hotel";
pub const FOOTER_SUBTEXT: &str = "Employee Management System";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// DOM element id the application mounts into.
pub const MOUNT_ELEMENT_ID: &str = "app";

// =============================================================================
// Logging
// =============================================================================

/// Console log level.
#[cfg(debug_assertions)]
pub const LOG_LEVEL: log::Level = log::Level::Debug;
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: log::Level = log::Level::Info;

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL of the employee management service.
pub const API_BASE_URL: &str = match option_env!("STAFFDESK_API_URL") {
    Some(url) => url,
    None => "http://localhost:8081/api",
};

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// Query Cache Defaults
// =============================================================================

/// Defaults for the shared query client.
pub mod query {
    /// Revalidate observed queries when the tab regains focus.
    pub const REFETCH_ON_WINDOW_FOCUS: bool = false;
    /// Number of retries after a failed fetch attempt.
    pub const RETRY: u32 = 1;
    /// Delay before the first retry, doubled for each further attempt.
    pub const RETRY_DELAY_MS: u64 = 1_000;
    /// Upper bound for the retry delay.
    pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
    /// How long fetched data counts as fresh.
    pub const STALE_TIME_MS: u64 = 0;
}

// =============================================================================
// Domain Configuration
// =============================================================================

/// Departments offered by the employee form, as stored by the backend.
pub const DEPARTMENTS: &[&str] = &[
    "FRONT_DESK",
    "HOUSEKEEPING",
    "KITCHEN",
    "RESTAURANT",
    "MAINTENANCE",
    "SECURITY",
    "MANAGEMENT",
];

/// Number of recent hires shown on the dashboard.
pub const RECENT_HIRES_LIMIT: usize = 5;

/// Pause in typing before the employee search goes to the backend.
pub const SEARCH_DEBOUNCE_MS: f64 = 300.0;

/// Currency symbol for salary display.
pub const CURRENCY_SYMBOL: &str = "$";

// =============================================================================
// UI Configuration
// =============================================================================

/// Media query under which the sidebar collapses to an icon rail.
pub const COMPACT_SIDEBAR_QUERY: &str = "(max-width: 768px)";

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder
/// - `Lucide` - Minimal, thin strokes (default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    Bootstrap,
    #[default]
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Lucide;

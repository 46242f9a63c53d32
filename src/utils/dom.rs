//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.
//! Every helper degrades to a no-op (or a neutral value) when no window is
//! available, which is the case in native unit tests.

use wasm_bindgen::JsValue;
use web_sys::Window;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL pathname (e.g. `/employees/7`).
pub fn get_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Push a new pathname onto the browser history.
pub fn push_path(path: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Replace the current history entry without adding to browser history.
///
/// Useful for redirects that shouldn't appear in back button history.
pub fn replace_path(path: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Set the document title.
pub fn set_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// Ask the user to confirm a destructive action.
///
/// Returns `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

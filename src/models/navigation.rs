//! Sidebar navigation model.
//!
//! A fixed, ordered menu. Highlighting compares the current location with
//! each entry's path by exact string equality, so `/employees/add` activates
//! "Add Employee" and never "All Employees".

/// Symbolic glyph reference, mapped to a concrete icon by the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Home,
    Users,
    UserPlus,
    BarChart,
}

/// One menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub path: &'static str,
    pub icon: NavIcon,
    pub label: &'static str,
}

/// Menu entries in display order.
pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry {
        path: "/",
        icon: NavIcon::Home,
        label: "Dashboard",
    },
    NavEntry {
        path: "/employees",
        icon: NavIcon::Users,
        label: "All Employees",
    },
    NavEntry {
        path: "/employees/add",
        icon: NavIcon::UserPlus,
        label: "Add Employee",
    },
    NavEntry {
        path: "/statistics",
        icon: NavIcon::BarChart,
        label: "Statistics",
    },
];

/// Section heading above the menu.
pub const NAV_SECTION_TITLE: &str = "Employee Management";

/// A menu entry paired with its highlight state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub entry: NavEntry,
    pub active: bool,
}

/// Compute the rendered menu for the given location.
pub fn nav_items(location: &str) -> Vec<NavItem> {
    NAV_ENTRIES
        .iter()
        .map(|entry| NavItem {
            entry: *entry,
            active: entry.path == location,
        })
        .collect()
}

/// The entry highlighted for `location`, if any.
pub fn active_entry(location: &str) -> Option<&'static NavEntry> {
    NAV_ENTRIES.iter().find(|entry| entry.path == location)
}

//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::NavIcon;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowLeft as ArrowLeft, LuBriefcase as Briefcase, LuCalendar as Calendar,
        LuDollarSign as Salary, LuHotel as Hotel, LuHouse as Home, LuMail as Mail,
        LuMapPin as Location, LuPencil as Edit, LuPhone as Phone, LuRefreshCw as Refresh,
        LuSearch as Search, LuTrash2 as Trash, LuTrendingUp as BarChart, LuUserPlus as UserPlus,
        LuUsers as Users,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowLeft as ArrowLeft, BsBarChartFill as BarChart,
        BsBriefcase as Briefcase, BsBuilding as Hotel, BsCalendar as Calendar,
        BsCashStack as Salary, BsEnvelope as Mail, BsGeoAltFill as Location,
        BsHouseFill as Home, BsPencil as Edit, BsPeopleFill as Users,
        BsPersonPlusFill as UserPlus, BsTelephone as Phone, BsSearch as Search,
        BsTrash as Trash,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(HOME, Home);
themed_icon!(USERS, Users);
themed_icon!(USER_PLUS, UserPlus);
themed_icon!(BAR_CHART, BarChart);
themed_icon!(HOTEL, Hotel);
themed_icon!(EDIT, Edit);
themed_icon!(TRASH, Trash);
themed_icon!(ARROW_LEFT, ArrowLeft);
themed_icon!(SEARCH, Search);
themed_icon!(REFRESH, Refresh);
themed_icon!(MAIL, Mail);
themed_icon!(PHONE, Phone);
themed_icon!(LOCATION, Location);
themed_icon!(CALENDAR, Calendar);
themed_icon!(BRIEFCASE, Briefcase);
themed_icon!(SALARY, Salary);

/// Concrete glyph for a sidebar entry.
pub fn nav_icon(icon: NavIcon) -> Icon {
    match icon {
        NavIcon::Home => HOME,
        NavIcon::Users => USERS,
        NavIcon::UserPlus => USER_PLUS,
        NavIcon::BarChart => BAR_CHART,
    }
}

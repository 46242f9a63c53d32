//! Path-based routing table.
//!
//! URL format follows the browser pathname (history API):
//! `/`, `/employees`, `/employees/42`, `/employees/add`,
//! `/employees/edit/42`, `/statistics`.

use super::employee::EmployeeId;

/// Application routes, one variant per entry of the route table.
///
/// Every pathname resolves to exactly one variant; anything outside the
/// table becomes [`AppRoute::NotFound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Overview cards: `/`
    Dashboard,
    /// All employees: `/employees`
    EmployeeList,
    /// Single employee: `/employees/:id`
    EmployeeDetails { id: EmployeeId },
    /// Creation form: `/employees/add`
    AddEmployee,
    /// Edit form: `/employees/edit/:id`
    EditEmployee { id: EmployeeId },
    /// Aggregated figures: `/statistics`
    Statistics,
    /// No pattern matched
    NotFound { path: String },
}

type Build = fn(Option<EmployeeId>) -> Option<AppRoute>;

/// Pattern table. `:id` only matches a positive integer segment, which keeps
/// `/employees/add` and `/employees/:id` disjoint.
const ROUTE_TABLE: &[(&str, Build)] = &[
    ("/", |_| Some(AppRoute::Dashboard)),
    ("/employees", |_| Some(AppRoute::EmployeeList)),
    ("/employees/:id", |id| {
        id.map(|id| AppRoute::EmployeeDetails { id })
    }),
    ("/employees/add", |_| Some(AppRoute::AddEmployee)),
    ("/employees/edit/:id", |id| {
        id.map(|id| AppRoute::EditEmployee { id })
    }),
    ("/statistics", |_| Some(AppRoute::Statistics)),
];

impl AppRoute {
    /// All patterns of the route table, in declaration order.
    pub fn patterns() -> impl Iterator<Item = &'static str> {
        ROUTE_TABLE.iter().map(|(pattern, _)| *pattern)
    }

    /// Resolve a pathname into a route.
    pub fn resolve(path: &str) -> Self {
        let path = normalize_path(path);
        ROUTE_TABLE
            .iter()
            .find_map(|(pattern, build)| match_pattern(pattern, &path).and_then(|id| build(id)))
            .unwrap_or(Self::NotFound { path })
    }

    /// Patterns of the table that accept `path`.
    ///
    /// Used to check that the table stays unambiguous.
    pub fn matching_patterns(path: &str) -> Vec<&'static str> {
        let path = normalize_path(path);
        ROUTE_TABLE
            .iter()
            .filter(|(pattern, _)| match_pattern(pattern, &path).is_some())
            .map(|(pattern, _)| *pattern)
            .collect()
    }

    /// Convert the route back into a pathname.
    pub fn to_path(&self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            Self::EmployeeList => "/employees".to_string(),
            Self::EmployeeDetails { id } => format!("/employees/{}", id),
            Self::AddEmployee => "/employees/add".to_string(),
            Self::EditEmployee { id } => format!("/employees/edit/{}", id),
            Self::Statistics => "/statistics".to_string(),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Page title shown in the layout header and the document title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::EmployeeList => "All Employees",
            Self::EmployeeDetails { .. } => "Employee Details",
            Self::AddEmployee => "Add Employee",
            Self::EditEmployee { .. } => "Edit Employee",
            Self::Statistics => "Statistics",
            Self::NotFound { .. } => "Page Not Found",
        }
    }

    /// Employee id carried by the route, if any.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            Self::EmployeeDetails { id } | Self::EditEmployee { id } => Some(*id),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Normalize a location into a bare pathname.
///
/// Drops query string and fragment, guarantees a leading `/`, and strips
/// trailing slashes except for the root.
pub fn normalize_path(raw: &str) -> String {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    format!("/{}", trimmed)
}

/// Match a pattern against a normalized path.
///
/// Returns `Some(param)` on a match, where `param` is the parsed `:id`
/// segment if the pattern has one.
fn match_pattern(pattern: &str, path: &str) -> Option<Option<EmployeeId>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut param = None;
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if *expected == ":id" {
            param = Some(parse_id(actual)?);
        } else if expected != actual {
            return None;
        }
    }
    Some(param)
}

/// Parse an id segment: ASCII digits only, greater than zero.
fn parse_id(segment: &str) -> Option<EmployeeId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(AppRoute::resolve("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::resolve(""), AppRoute::Dashboard);
        assert_eq!(AppRoute::resolve("/employees"), AppRoute::EmployeeList);
        assert_eq!(
            AppRoute::resolve("/employees/42"),
            AppRoute::EmployeeDetails { id: 42 }
        );
        assert_eq!(AppRoute::resolve("/employees/add"), AppRoute::AddEmployee);
        assert_eq!(
            AppRoute::resolve("/employees/edit/7"),
            AppRoute::EditEmployee { id: 7 }
        );
        assert_eq!(AppRoute::resolve("/statistics"), AppRoute::Statistics);
    }

    #[test]
    fn test_route_normalization() {
        assert_eq!(AppRoute::resolve("/employees/"), AppRoute::EmployeeList);
        assert_eq!(
            AppRoute::resolve("/employees/5?tab=info#top"),
            AppRoute::EmployeeDetails { id: 5 }
        );
        assert_eq!(normalize_path("statistics"), "/statistics");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        for path in [
            "/employees/abc",
            "/employees/0",
            "/employees/-3",
            "/employees/edit",
            "/employees/edit/x",
            "/employees/7/extra",
            "/settings",
            "/Employees",
        ] {
            assert_eq!(
                AppRoute::resolve(path),
                AppRoute::NotFound {
                    path: normalize_path(path)
                },
                "{path} should not resolve"
            );
        }
    }

    #[test]
    fn test_table_is_unambiguous() {
        let samples = [
            "/",
            "/employees",
            "/employees/1",
            "/employees/999",
            "/employees/add",
            "/employees/edit/1",
            "/statistics",
        ];
        for path in samples {
            assert_eq!(
                AppRoute::matching_patterns(path).len(),
                1,
                "{path} must match exactly one pattern"
            );
        }
        assert!(AppRoute::matching_patterns("/nope").is_empty());
        assert_eq!(AppRoute::patterns().count(), 6);
    }

    #[test]
    fn test_route_to_path() {
        let routes = [
            AppRoute::Dashboard,
            AppRoute::EmployeeList,
            AppRoute::EmployeeDetails { id: 12 },
            AppRoute::AddEmployee,
            AppRoute::EditEmployee { id: 3 },
            AppRoute::Statistics,
        ];
        for route in routes {
            assert_eq!(AppRoute::resolve(&route.to_path()), route);
        }
        assert_eq!(
            AppRoute::NotFound {
                path: "/missing".to_string()
            }
            .to_path(),
            "/missing"
        );
    }

    #[test]
    fn test_employee_id_param() {
        assert_eq!(AppRoute::resolve("/employees/edit/7").employee_id(), Some(7));
        assert_eq!(AppRoute::resolve("/employees/add").employee_id(), None);
    }
}

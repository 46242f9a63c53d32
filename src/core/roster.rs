//! Client-side views over employee lists: filtering, sorting and
//! aggregations used by the list, dashboard and statistics pages.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{DepartmentStatistics, Employee, EmployeeStatus};

/// Column the employee list is sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Department,
    Salary,
    HireDate,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Name, Self::Department, Self::Salary, Self::HireDate];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Department => "Department",
            Self::Salary => "Salary",
            Self::HireDate => "Hire date",
        }
    }

    /// Stable identifier for `<select>` values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Department => "department",
            Self::Salary => "salary",
            Self::HireDate => "hire_date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

/// List filter state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterFilter {
    /// Matched against first and last name, case-insensitive.
    pub search: String,
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl RosterFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        employee.name_contains(&self.search)
            && self
                .department
                .as_ref()
                .is_none_or(|dept| employee.department == *dept)
            && self.status.is_none_or(|status| employee.status == status)
    }

    /// Filter then sort, returning a new list.
    pub fn apply(&self, employees: &[Employee], sort: SortKey, descending: bool) -> Vec<Employee> {
        let mut list: Vec<Employee> = employees
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        sort_employees(&mut list, sort, descending);
        list
    }
}

/// Sort in place. Ties fall back to the id so the order is deterministic.
pub fn sort_employees(list: &mut [Employee], key: SortKey, descending: bool) {
    list.sort_by(|a, b| {
        let primary = match key {
            SortKey::Name => a
                .last_name
                .to_lowercase()
                .cmp(&b.last_name.to_lowercase())
                .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase())),
            SortKey::Department => a.department.cmp(&b.department),
            SortKey::Salary => a.salary.partial_cmp(&b.salary).unwrap_or(Ordering::Equal),
            SortKey::HireDate => a.hire_date.cmp(&b.hire_date),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Distinct departments present in `employees`, sorted.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    employees
        .iter()
        .map(|e| e.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Head count per status, in [`EmployeeStatus::ALL`] order.
pub fn status_breakdown(employees: &[Employee]) -> Vec<(EmployeeStatus, usize)> {
    EmployeeStatus::ALL
        .into_iter()
        .map(|status| {
            let count = employees.iter().filter(|e| e.status == status).count();
            (status, count)
        })
        .collect()
}

/// Most recently hired employees, newest first.
pub fn recent_hires(employees: &[Employee], limit: usize) -> Vec<Employee> {
    let mut list = employees.to_vec();
    sort_employees(&mut list, SortKey::HireDate, true);
    list.truncate(limit);
    list
}

/// Share of the total head count per department, in percent, largest first.
pub fn department_share(stats: &[DepartmentStatistics]) -> Vec<(String, f64)> {
    let total: u64 = stats.iter().map(|s| s.employee_count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<(String, f64)> = stats
        .iter()
        .map(|s| {
            (
                s.department.clone(),
                s.employee_count as f64 * 100.0 / total as f64,
            )
        })
        .collect();
    shares.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    shares
}

/// Percentage of `part` in `whole`, zero when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn employee(id: u64, first: &str, last: &str, dept: &str, salary: f64, hired: (i32, u32, u32), status: EmployeeStatus) -> Employee {
        Employee {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@hotel.com", first.to_lowercase(), last.to_lowercase()),
            phone: "1234567890".to_string(),
            position: "Staff".to_string(),
            department: dept.to_string(),
            salary,
            hire_date: NaiveDate::from_ymd_opt(hired.0, hired.1, hired.2).unwrap(),
            status,
            address: None,
        }
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee(1, "John", "Smith", "FRONT_DESK", 55000.0, (2022, 1, 15), EmployeeStatus::Active),
            employee(2, "Sarah", "Johnson", "FRONT_DESK", 35000.0, (2023, 3, 20), EmployeeStatus::Active),
            employee(3, "Lisa", "Martinez", "HOUSEKEEPING", 31000.0, (2023, 7, 22), EmployeeStatus::OnLeave),
            employee(4, "James", "Anderson", "KITCHEN", 65000.0, (2020, 9, 1), EmployeeStatus::Inactive),
        ]
    }

    #[test]
    fn test_filter_by_search_department_status() {
        let list = staff();
        let filter = RosterFilter {
            search: "jo".to_string(),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&list, SortKey::Name, false).iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 1]);

        let filter = RosterFilter {
            department: Some("FRONT_DESK".to_string()),
            status: Some(EmployeeStatus::Active),
            ..Default::default()
        };
        assert_eq!(filter.apply(&list, SortKey::Name, false).len(), 2);

        let filter = RosterFilter {
            status: Some(EmployeeStatus::OnLeave),
            ..Default::default()
        };
        let hits = filter.apply(&list, SortKey::Name, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Lisa");
    }

    #[test]
    fn test_sorting() {
        let mut list = staff();
        sort_employees(&mut list, SortKey::Salary, true);
        assert_eq!(list.iter().map(|e| e.id).collect::<Vec<_>>(), [4, 1, 2, 3]);

        sort_employees(&mut list, SortKey::HireDate, false);
        assert_eq!(list.first().map(|e| e.id), Some(4));

        sort_employees(&mut list, SortKey::Department, false);
        assert_eq!(list.iter().map(|e| e.id).collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_key_parse() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("age"), None);
    }

    #[test]
    fn test_aggregations() {
        let list = staff();
        assert_eq!(departments(&list), ["FRONT_DESK", "HOUSEKEEPING", "KITCHEN"]);
        assert_eq!(
            status_breakdown(&list),
            vec![
                (EmployeeStatus::Active, 2),
                (EmployeeStatus::Inactive, 1),
                (EmployeeStatus::OnLeave, 1)
            ]
        );
        let recent: Vec<_> = recent_hires(&list, 2).iter().map(|e| e.id).collect();
        assert_eq!(recent, [3, 2]);
    }

    #[test]
    fn test_department_share() {
        let stats = vec![
            DepartmentStatistics {
                department: "KITCHEN".to_string(),
                employee_count: 1,
                average_salary: 65000.0,
                total_salary: 65000.0,
                active_count: 1,
            },
            DepartmentStatistics {
                department: "FRONT_DESK".to_string(),
                employee_count: 3,
                average_salary: 40000.0,
                total_salary: 120000.0,
                active_count: 3,
            },
        ];
        let shares = department_share(&stats);
        assert_eq!(shares[0].0, "FRONT_DESK");
        assert!((shares[0].1 - 75.0).abs() < f64::EPSILON);
        assert!((shares[1].1 - 25.0).abs() < f64::EPSILON);
        assert!(department_share(&[]).is_empty());
        assert_eq!(percent(1, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}

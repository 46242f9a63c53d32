//! Employee records and the backend's JSON contract.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{FetchError, ValidationError};

/// Backend primary key.
pub type EmployeeId = u64;

const NAME_MAX_LEN: usize = 50;
const TEXT_MAX_LEN: usize = 100;
const ADDRESS_MAX_LEN: usize = 200;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));

// ============================================================================
// Status
// ============================================================================

/// Employment status as stored by the backend (`ACTIVE`, `INACTIVE`, `ON_LEAVE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::OnLeave => "ON_LEAVE",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmployeeStatus {
    type Err = ValidationError;

    /// Case-insensitive, matching how the backend compares statuses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

// ============================================================================
// Employee
// ============================================================================

/// Employee record as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub address: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match on first or last name, like the backend search.
    pub fn name_contains(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.first_name.to_lowercase().contains(&term)
            || self.last_name.to_lowercase().contains(&term)
    }
}

/// Body of create and update requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// ============================================================================
// Form Draft
// ============================================================================

/// Raw form input for the add and edit pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: String,
    pub hire_date: String,
    pub status: String,
    pub address: String,
}

impl EmployeeDraft {
    /// Empty form with the default status preselected.
    pub fn new() -> Self {
        Self {
            status: EmployeeStatus::Active.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Prefill the form from an existing record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: format!("{}", employee.salary),
            hire_date: employee.hire_date.format("%Y-%m-%d").to_string(),
            status: employee.status.as_str().to_string(),
            address: employee.address.clone().unwrap_or_default(),
        }
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<EmployeePayload, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let first_name = required(&self.first_name, "First name", NAME_MAX_LEN, &mut errors);
        let last_name = required(&self.last_name, "Last name", NAME_MAX_LEN, &mut errors);
        let position = required(&self.position, "Position", TEXT_MAX_LEN, &mut errors);
        let department = required(&self.department, "Department", TEXT_MAX_LEN, &mut errors);

        let email = self.email.trim().to_string();
        if email.is_empty() {
            errors.push(ValidationError::Required("Email"));
        } else if !EMAIL_RE.is_match(&email) {
            errors.push(ValidationError::InvalidEmail);
        }

        let phone = self.phone.trim().to_string();
        if phone.is_empty() {
            errors.push(ValidationError::Required("Phone"));
        } else if !PHONE_RE.is_match(&phone) {
            errors.push(ValidationError::InvalidPhone);
        }

        let salary = match self.salary.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Some(value),
            _ if self.salary.trim().is_empty() => {
                errors.push(ValidationError::Required("Salary"));
                None
            }
            _ => {
                errors.push(ValidationError::InvalidSalary);
                None
            }
        };

        let hire_date = if self.hire_date.trim().is_empty() {
            errors.push(ValidationError::Required("Hire date"));
            None
        } else {
            NaiveDate::parse_from_str(self.hire_date.trim(), "%Y-%m-%d")
                .map_err(|_| errors.push(ValidationError::InvalidDate))
                .ok()
        };

        let status = self
            .status
            .parse::<EmployeeStatus>()
            .map_err(|e| errors.push(e))
            .ok();

        let address = self.address.trim();
        if address.chars().count() > ADDRESS_MAX_LEN {
            errors.push(ValidationError::TooLong {
                field: "Address",
                max: ADDRESS_MAX_LEN,
            });
        }

        match (salary, hire_date, status) {
            (Some(salary), Some(hire_date), Some(status)) if errors.is_empty() => {
                Ok(EmployeePayload {
                    first_name,
                    last_name,
                    email,
                    phone,
                    position,
                    department,
                    salary,
                    hire_date,
                    status,
                    address: (!address.is_empty()).then(|| address.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

fn required(
    value: &str,
    field: &'static str,
    max: usize,
    errors: &mut Vec<ValidationError>,
) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::Required(field));
    } else if value.chars().count() > max {
        errors.push(ValidationError::TooLong { field, max });
    }
    value.to_string()
}

// ============================================================================
// Backend Envelope and Statistics
// ============================================================================

/// Envelope wrapping every backend response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, mapping `success: false` to [`FetchError::Api`].
    pub fn into_data(self, status: u16) -> Result<T, FetchError> {
        if !self.success {
            return Err(FetchError::Api {
                status,
                message: self.message,
            });
        }
        self.data.ok_or(FetchError::EmptyResponse)
    }

    /// Check the envelope of a response whose payload is irrelevant.
    pub fn into_unit(self, status: u16) -> Result<(), FetchError> {
        if self.success {
            Ok(())
        } else {
            Err(FetchError::Api {
                status,
                message: self.message,
            })
        }
    }
}

/// Organisation-wide figures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatistics {
    pub total_employees: u64,
    pub active_employees: u64,
    pub inactive_employees: u64,
    pub on_leave_employees: u64,
    pub average_salary: f64,
    pub total_salary_expense: f64,
}

/// Per-department figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStatistics {
    pub department: String,
    pub employee_count: u64,
    pub average_salary: f64,
    pub total_salary: f64,
    pub active_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> EmployeeDraft {
        EmployeeDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@hotel.com".to_string(),
            phone: "1234567890".to_string(),
            position: "Manager".to_string(),
            department: "FRONT_DESK".to_string(),
            salary: "50000".to_string(),
            hire_date: "2023-01-15".to_string(),
            status: "ACTIVE".to_string(),
            address: "123 Main St".to_string(),
        }
    }

    #[test]
    fn test_deserialize_backend_employee() {
        let json = r#"{
            "id": 1,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@hotel.com",
            "phone": "1234567890",
            "position": "Manager",
            "department": "FRONT_DESK",
            "salary": 50000.0,
            "hireDate": "2023-01-15",
            "status": "ON_LEAVE",
            "address": null
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 1);
        assert_eq!(employee.full_name(), "John Doe");
        assert_eq!(employee.status, EmployeeStatus::OnLeave);
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(employee.address, None);
    }

    #[test]
    fn test_envelope_unwrapping() {
        let ok: ApiResponse<u64> =
            serde_json::from_str(r#"{"success":true,"message":"ok","data":17}"#).unwrap();
        assert_eq!(ok.into_data(200), Ok(17));

        let missing: ApiResponse<Employee> = serde_json::from_str(
            r#"{"success":false,"message":"Employee not found with id: 9","data":null}"#,
        )
        .unwrap();
        let err = missing.into_data(404).unwrap_err();
        assert!(err.is_not_found());

        let empty: ApiResponse<u64> =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert_eq!(empty.into_data(200), Err(FetchError::EmptyResponse));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("on_leave".parse::<EmployeeStatus>(), Ok(EmployeeStatus::OnLeave));
        assert_eq!("ACTIVE".parse::<EmployeeStatus>(), Ok(EmployeeStatus::Active));
        assert!("RETIRED".parse::<EmployeeStatus>().is_err());
        assert_eq!(EmployeeStatus::OnLeave.to_string(), "On Leave");
    }

    #[test]
    fn test_valid_draft_produces_payload() {
        let payload = valid_draft().validate().unwrap();
        assert_eq!(payload.salary, 50000.0);
        assert_eq!(payload.status, EmployeeStatus::Active);
        assert_eq!(payload.address.as_deref(), Some("123 Main St"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["hireDate"], "2023-01-15");
        assert_eq!(json["status"], "ACTIVE");
    }

    #[test]
    fn test_invalid_draft_collects_all_errors() {
        let draft = EmployeeDraft {
            first_name: "  ".to_string(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            salary: "-10".to_string(),
            hire_date: "15/01/2023".to_string(),
            status: "RETIRED".to_string(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::Required("First name")));
        assert!(errors.contains(&ValidationError::InvalidEmail));
        assert!(errors.contains(&ValidationError::InvalidPhone));
        assert!(errors.contains(&ValidationError::InvalidSalary));
        assert!(errors.contains(&ValidationError::InvalidDate));
        assert!(errors.contains(&ValidationError::InvalidStatus("RETIRED".to_string())));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_draft_roundtrip_from_employee() {
        let payload = valid_draft().validate().unwrap();
        let employee = Employee {
            id: 3,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            position: payload.position,
            department: payload.department,
            salary: payload.salary,
            hire_date: payload.hire_date,
            status: payload.status,
            address: None,
        };
        let draft = EmployeeDraft::from_employee(&employee);
        assert_eq!(draft.hire_date, "2023-01-15");
        assert_eq!(draft.salary, "50000");
        assert!(draft.validate().unwrap().address.is_none());
    }

    #[test]
    fn test_name_search() {
        let payload = valid_draft().validate().unwrap();
        let employee = Employee {
            id: 1,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            position: payload.position,
            department: payload.department,
            salary: payload.salary,
            hire_date: payload.hire_date,
            status: payload.status,
            address: payload.address,
        };
        assert!(employee.name_contains("jo"));
        assert!(employee.name_contains("DOE"));
        assert!(employee.name_contains(""));
        assert!(!employee.name_contains("smith"));
    }
}

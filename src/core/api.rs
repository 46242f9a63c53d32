//! Typed client for the employee management service.
//!
//! - [`EmployeeApi`] - One method per backend endpoint
//! - [`keys`] - Cache keys under which pages store the results

use crate::config;
use crate::core::error::FetchError;
use crate::models::{
    DepartmentStatistics, Employee, EmployeeId, EmployeePayload, EmployeeStatistics,
    EmployeeStatus,
};
use crate::utils::{Method, fetch_api, fetch_api_unit};

/// Cache keys shared by the pages and the mutations that invalidate them.
pub mod keys {
    use crate::core::query::QueryKey;
    use crate::models::EmployeeId;

    pub fn employees() -> QueryKey {
        QueryKey::new(["employees"])
    }

    pub fn employee(id: EmployeeId) -> QueryKey {
        employees().with(id)
    }

    pub fn search(term: &str) -> QueryKey {
        employees().with("search").with(term.trim().to_lowercase())
    }

    pub fn statistics() -> QueryKey {
        QueryKey::new(["statistics"])
    }

    pub fn department_statistics() -> QueryKey {
        statistics().with("departments")
    }

    /// Everything a write to an employee can make outdated.
    pub fn after_write() -> [QueryKey; 2] {
        [employees(), statistics()]
    }
}

/// Endpoints under `{base_url}/employees`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmployeeApi {
    base_url: &'static str,
}

impl Default for EmployeeApi {
    fn default() -> Self {
        Self::new(config::API_BASE_URL)
    }
}

impl EmployeeApi {
    pub fn new(base_url: &'static str) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &'static str {
        self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/employees{}", self.base_url.trim_end_matches('/'), path)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub async fn list(self) -> Result<Vec<Employee>, FetchError> {
        fetch_api(Method::Get, &self.url(""), None).await
    }

    pub async fn get(self, id: EmployeeId) -> Result<Employee, FetchError> {
        fetch_api(Method::Get, &self.url(&format!("/{}", id)), None).await
    }

    /// Case-insensitive search on first and last name.
    pub async fn search(self, name: String) -> Result<Vec<Employee>, FetchError> {
        fetch_api(Method::Get, &self.url(&search_path(&name)), None).await
    }

    pub async fn statistics(self) -> Result<EmployeeStatistics, FetchError> {
        fetch_api(Method::Get, &self.url("/statistics"), None).await
    }

    pub async fn department_statistics(self) -> Result<Vec<DepartmentStatistics>, FetchError> {
        fetch_api(Method::Get, &self.url("/statistics/departments"), None).await
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub async fn create(self, payload: EmployeePayload) -> Result<Employee, FetchError> {
        let body = to_json(&payload)?;
        fetch_api(Method::Post, &self.url(""), Some(&body)).await
    }

    pub async fn update(
        self,
        id: EmployeeId,
        payload: EmployeePayload,
    ) -> Result<Employee, FetchError> {
        let body = to_json(&payload)?;
        fetch_api(Method::Put, &self.url(&format!("/{}", id)), Some(&body)).await
    }

    pub async fn update_status(
        self,
        id: EmployeeId,
        status: EmployeeStatus,
    ) -> Result<Employee, FetchError> {
        let path = format!("/{}/status?status={}", id, status.as_str());
        fetch_api(Method::Patch, &self.url(&path), None).await
    }

    pub async fn delete(self, id: EmployeeId) -> Result<(), FetchError> {
        fetch_api_unit(Method::Delete, &self.url(&format!("/{}", id)), None).await
    }
}

fn to_json(payload: &EmployeePayload) -> Result<String, FetchError> {
    serde_json::to_string(payload).map_err(|e| FetchError::JsonParse(e.to_string()))
}

fn search_path(name: &str) -> String {
    format!("/search?name={}", urlencoding::encode(name.trim()))
}

use serde::{Deserialize, Serialize};

use staffbook_core::DomainResult;
use staffbook_employees::NewEmployee;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/v1/employees` and `PUT /api/v1/employees/{id}`.
///
/// Missing names decode as empty and are rejected by `NewEmployee::new`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_id: String,
}

impl EmployeeRequest {
    pub fn into_new_employee(self) -> DomainResult<NewEmployee> {
        NewEmployee::new(self.first_name, self.last_name, self.email_id)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

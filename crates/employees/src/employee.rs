use core::str::FromStr;

use serde::{Deserialize, Serialize};

use staffbook_core::{DomainError, DomainResult, Entity};

/// Employee identifier, assigned by the repository on insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmployeeId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("EmployeeId: {e}")))
    }
}

/// A persisted employee record.
///
/// Only the repository hands these out, so the id is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

impl Employee {
    /// Attach a repository-assigned id to a validated payload.
    pub fn from_new(id: EmployeeId, new: NewEmployee) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email_id: new.email_id,
        }
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}

/// Payload for creating an employee or replacing its descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

impl NewEmployee {
    /// Build a payload, rejecting blank names.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_id: impl Into<String>,
    ) -> DomainResult<Self> {
        let new = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_id: email_id.into(),
        };
        new.validate()?;
        Ok(new)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(DomainError::validation("firstName must not be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("lastName must not be empty"));
        }
        Ok(())
    }
}

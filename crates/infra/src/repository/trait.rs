use std::sync::Arc;

use thiserror::Error;

use staffbook_employees::{Employee, EmployeeId, NewEmployee};

/// Storage failure surfaced by a repository.
///
/// "Not found" is not an error here: lookups return `Option` and deletes
/// return `bool`, and the caller decides what absence means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached (pool closed, lock poisoned, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected or failed an operation.
    #[error("storage error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A stored row could not be mapped back to an `Employee`.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

/// Persistence seam for employee records.
///
/// Implementations own id assignment and ordering: `find_all` returns
/// employees in the store's natural order (ascending id for both bundled
/// backends) and callers must preserve it.
#[async_trait::async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, in repository order.
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError>;

    /// A single employee, if one exists with this id.
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    /// Insert a new employee and return it with its assigned id.
    async fn save(&self, new: NewEmployee) -> Result<Employee, RepositoryError>;

    /// Replace the descriptive fields of an existing employee.
    ///
    /// Returns `None` when no employee has this id.
    async fn update(
        &self,
        id: EmployeeId,
        new: NewEmployee,
    ) -> Result<Option<Employee>, RepositoryError>;

    /// Remove an employee. Returns whether a record was removed.
    async fn delete_by_id(&self, id: EmployeeId) -> Result<bool, RepositoryError>;
}

#[async_trait::async_trait]
impl<R> EmployeeRepository for Arc<R>
where
    R: EmployeeRepository + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, new: NewEmployee) -> Result<Employee, RepositoryError> {
        (**self).save(new).await
    }

    async fn update(
        &self,
        id: EmployeeId,
        new: NewEmployee,
    ) -> Result<Option<Employee>, RepositoryError> {
        (**self).update(id, new).await
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        (**self).delete_by_id(id).await
    }
}

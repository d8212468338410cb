//! Postgres-backed employee repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | PoolClosed, PoolTimedOut, Io | `Unavailable` |
//! | Database (any code) | `Backend` |
//! | ColumnDecode, ColumnNotFound | `CorruptRow` |
//! | Other | `Backend` |
//!
//! ## Ordering
//!
//! `find_all` orders by `id` ascending, matching the in-memory store.

use std::sync::Arc;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use staffbook_employees::{Employee, EmployeeId, NewEmployee};

use super::{EmployeeRepository, RepositoryError};

/// Postgres-backed employee store.
///
/// Uses a shared SQLx pool; cloning is cheap.
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: Arc<PgPool>,
}

impl PostgresEmployeeRepository {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Create the `employees` table if it is missing.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id         BIGSERIAL PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name  TEXT NOT NULL,
                email_id   TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email_id
            FROM employees
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(employee_from_row).collect()
    }

    #[instrument(skip(self), fields(employee_id = %id), err)]
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email_id
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(employee_from_row).transpose()
    }

    #[instrument(skip(self, new), err)]
    async fn save(&self, new: NewEmployee) -> Result<Employee, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, email_id)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email_id
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        employee_from_row(&row)
    }

    #[instrument(skip(self, new), fields(employee_id = %id), err)]
    async fn update(
        &self,
        id: EmployeeId,
        new: NewEmployee,
    ) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = $2, last_name = $3, email_id = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, email_id
            "#,
        )
        .bind(id.get())
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email_id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.as_ref().map(employee_from_row).transpose()
    }

    #[instrument(skip(self), fields(employee_id = %id), err)]
    async fn delete_by_id(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn employee_from_row(row: &PgRow) -> Result<Employee, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::CorruptRow(e.to_string());
    Ok(Employee {
        id: EmployeeId::new(row.try_get::<i64, _>("id").map_err(decode)?),
        first_name: row.try_get("first_name").map_err(decode)?,
        last_name: row.try_get("last_name").map_err(decode)?,
        email_id: row.try_get("email_id").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Backend {
            operation,
            message: match db_err.code() {
                Some(code) => format!("{} (sqlstate {code})", db_err.message()),
                None => db_err.message().to_string(),
            },
        },
        sqlx::Error::PoolClosed => {
            RepositoryError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::Io(e) => RepositoryError::Unavailable(format!("io error in {operation}: {e}")),
        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_)) => {
            RepositoryError::CorruptRow(e.to_string())
        }
        other => RepositoryError::Backend {
            operation,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_unavailable() {
        assert_eq!(
            map_sqlx_error("find_all", sqlx::Error::PoolClosed),
            RepositoryError::Unavailable("connection pool closed in find_all".to_string())
        );
        assert!(matches!(
            map_sqlx_error("save", sqlx::Error::PoolTimedOut),
            RepositoryError::Unavailable(_)
        ));
    }

    #[test]
    fn missing_column_maps_to_corrupt_row() {
        assert!(matches!(
            map_sqlx_error("find_by_id", sqlx::Error::ColumnNotFound("email_id".to_string())),
            RepositoryError::CorruptRow(_)
        ));
    }

    #[test]
    fn other_errors_keep_operation_name() {
        match map_sqlx_error("update", sqlx::Error::RowNotFound) {
            RepositoryError::Backend { operation, .. } => assert_eq!(operation, "update"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}

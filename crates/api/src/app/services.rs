use std::sync::Arc;

use anyhow::Context;

use staffbook_infra::{EmployeeRepository, InMemoryEmployeeRepository, PostgresEmployeeRepository};

use crate::config::StorageConfig;

/// Shared, immutable handles used by request handlers.
#[derive(Clone)]
pub struct AppServices {
    employees: Arc<dyn EmployeeRepository>,
}

impl AppServices {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    /// Empty in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryEmployeeRepository::new()))
    }

    pub fn employees(&self) -> &dyn EmployeeRepository {
        self.employees.as_ref()
    }
}

pub async fn build_services(storage: &StorageConfig) -> anyhow::Result<AppServices> {
    match storage {
        StorageConfig::InMemory => {
            tracing::info!("using in-memory employee repository");
            Ok(AppServices::in_memory())
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "using postgres employee repository");
            let repo = PostgresEmployeeRepository::connect(database_url, *max_connections)
                .await
                .context("failed to open postgres employee repository")?;
            Ok(AppServices::new(Arc::new(repo)))
        }
    }
}

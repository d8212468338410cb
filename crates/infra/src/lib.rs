//! Infrastructure layer: employee storage adapters.

pub mod repository;

pub use repository::{
    EmployeeRepository, InMemoryEmployeeRepository, PostgresEmployeeRepository, RepositoryError,
};

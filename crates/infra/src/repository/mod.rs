//! Employee repository abstraction and its storage backends.

mod r#trait;
pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryEmployeeRepository;
pub use postgres::PostgresEmployeeRepository;
pub use r#trait::{EmployeeRepository, RepositoryError};

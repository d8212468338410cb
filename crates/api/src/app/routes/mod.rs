use axum::Router;

pub mod employees;
pub mod system;

/// Router for all versioned API endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/v1/employees", employees::router())
}

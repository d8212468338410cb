use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use staffbook_core::DomainError;
use staffbook_employees::EmployeeId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let employees = services.employees().find_all().await?;
    Ok((StatusCode::OK, Json(employees)).into_response())
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: EmployeeId = id.parse()?;
    match services.employees().find_by_id(id).await? {
        Some(employee) => Ok((StatusCode::OK, Json(employee)).into_response()),
        None => Err(not_found(id)),
    }
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::EmployeeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let new = body.into_new_employee()?;
    let employee = services.employees().save(new).await?;
    tracing::info!(employee_id = %employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)).into_response())
}

pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::EmployeeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id: EmployeeId = id.parse()?;
    let Json(body) = body?;
    let new = body.into_new_employee()?;
    match services.employees().update(id, new).await? {
        Some(employee) => {
            tracing::info!(employee_id = %id, "employee updated");
            Ok((StatusCode::OK, Json(employee)).into_response())
        }
        None => Err(not_found(id)),
    }
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: EmployeeId = id.parse()?;
    if !services.employees().delete_by_id(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(employee_id = %id, "employee deleted");
    Ok((StatusCode::OK, Json(dto::DeletedResponse { deleted: true })).into_response())
}

fn not_found(id: EmployeeId) -> ApiError {
    DomainError::not_found(format!("employee {id} not found")).into()
}

//! Employee API handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, ApiPath, AppState};
use crate::error::Result;
use crate::models::{EmployeePatch, EmployeeRequest, EmployeeResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list).post(create))
        .route(
            "/api/employees/{id}",
            get(get_by_id).put(update).patch(patch).delete(delete),
        )
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>> {
    Ok(Json(state.employees.get_all().await?))
}

async fn get_by_id(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<EmployeeResponse>> {
    Ok(Json(state.employees.get_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>> {
    Ok(Json(state.employees.create(request).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>> {
    Ok(Json(state.employees.update(id, request).await?))
}

async fn patch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<EmployeeResponse>> {
    Ok(Json(state.employees.patch(id, patch).await?))
}

async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode> {
    state.employees.delete(id).await?;
    Ok(StatusCode::OK)
}

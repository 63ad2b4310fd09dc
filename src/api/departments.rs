//! Department API handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, ApiPath, AppState};
use crate::error::Result;
use crate::models::{DepartmentPatch, DepartmentRequest, DepartmentResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/departments", get(list).post(create))
        .route(
            "/api/departments/{id}",
            get(get_by_id).put(update).patch(patch).delete(delete),
        )
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<DepartmentResponse>>> {
    Ok(Json(state.departments.get_all().await?))
}

async fn get_by_id(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<DepartmentResponse>> {
    Ok(Json(state.departments.get_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DepartmentRequest>,
) -> Result<Json<DepartmentResponse>> {
    Ok(Json(state.departments.create(request).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<DepartmentRequest>,
) -> Result<Json<DepartmentResponse>> {
    Ok(Json(state.departments.update(id, request).await?))
}

async fn patch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<DepartmentPatch>,
) -> Result<Json<DepartmentResponse>> {
    Ok(Json(state.departments.patch(id, patch).await?))
}

async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode> {
    state.departments.delete(id).await?;
    Ok(StatusCode::OK)
}

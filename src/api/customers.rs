//! Customer API handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, ApiPath, AppState};
use crate::error::Result;
use crate::models::{CustomerPatch, CustomerRequest, CustomerResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list).post(create))
        .route(
            "/api/customers/{id}",
            get(get_by_id).put(update).patch(patch).delete(delete),
        )
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerResponse>>> {
    Ok(Json(state.customers.get_all().await?))
}

async fn get_by_id(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<CustomerResponse>> {
    Ok(Json(state.customers.get_by_id(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<Json<CustomerResponse>> {
    Ok(Json(state.customers.create(request).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<Json<CustomerResponse>> {
    Ok(Json(state.customers.update(id, request).await?))
}

async fn patch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<CustomerPatch>,
) -> Result<Json<CustomerResponse>> {
    Ok(Json(state.customers.patch(id, patch).await?))
}

async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode> {
    state.customers.delete(id).await?;
    Ok(StatusCode::OK)
}

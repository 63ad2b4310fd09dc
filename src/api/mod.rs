//! HTTP boundary: axum routers translating requests into service calls.
//!
//! Handlers hold no business logic. Service errors become responses through
//! [`AppError`](crate::AppError)'s `IntoResponse` implementation.

mod customers;
mod departments;
mod employees;
mod extract;
mod health;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::db::{
    CustomerRepository, DepartmentRepository, EmployeeRepository, InMemoryCustomerRepository,
    InMemoryDepartmentRepository, InMemoryEmployeeRepository, SeaOrmCustomerRepository, SeaOrmDepartmentRepository,
    SeaOrmEmployeeRepository,
};
use crate::mapper::DefaultEmployeeMapper;
use crate::service::{CustomerService, DepartmentService, EmployeeService};

pub use extract::{ApiJson, ApiPath};

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeService,
    pub departments: DepartmentService,
    pub customers: CustomerService,
}

impl AppState {
    /// Wire services over the given repositories with the default employee mapper.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            employees: EmployeeService::new(employees, departments.clone(), Arc::new(DefaultEmployeeMapper)),
            departments: DepartmentService::new(departments),
            customers: CustomerService::new(customers),
        }
    }

    /// Services backed by PostgreSQL.
    pub fn postgres(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self::new(
            Arc::new(SeaOrmEmployeeRepository::new(db.clone())),
            Arc::new(SeaOrmDepartmentRepository::new(db.clone())),
            Arc::new(SeaOrmCustomerRepository::new(db)),
        )
    }

    /// Services backed by empty in-memory stores.
    pub fn in_memory() -> Self {
        let departments = Arc::new(InMemoryDepartmentRepository::new());
        Self::new(
            Arc::new(InMemoryEmployeeRepository::with_departments(&departments)),
            departments,
            Arc::new(InMemoryCustomerRepository::new()),
        )
    }
}

/// Build the application router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(departments::router())
        .merge(customers::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

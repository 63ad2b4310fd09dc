//! Translation between employee DTOs and the employee record.

use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeRequest, EmployeeResponse};

/// Structural transform between wire shapes and [`Employee`].
///
/// Implementations must be pure: no lookups, no I/O, no shared mutable state.
pub trait EmployeeMapper: Send + Sync {
    /// Build an unsaved employee from a request. Relations are left unset.
    fn to_entity(&self, request: &EmployeeRequest) -> Result<Employee>;

    /// Render a persisted employee for clients.
    fn to_response(&self, employee: &Employee) -> Result<EmployeeResponse>;
}

/// Field-by-field mapper used by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEmployeeMapper;

impl EmployeeMapper for DefaultEmployeeMapper {
    fn to_entity(&self, request: &EmployeeRequest) -> Result<Employee> {
        let salary = request
            .salary
            .ok_or_else(|| AppError::invalid_argument("salary is required"))?;

        Ok(Employee {
            id: None,
            name: request.name.clone(),
            position: request.position.clone(),
            salary,
            department: None,
            manager: None,
        })
    }

    fn to_response(&self, employee: &Employee) -> Result<EmployeeResponse> {
        let id = employee
            .id
            .ok_or_else(|| AppError::invalid_argument("employee has not been persisted"))?;

        Ok(EmployeeResponse {
            id,
            name: employee.name.clone(),
            position: employee.position.clone(),
            salary: employee.salary,
            department: employee.department.as_ref().map(|d| d.name.clone()),
            manager: employee.manager.as_ref().map(|m| m.name.clone()),
        })
    }
}

//! Employee CRUD service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::require_name;
use crate::db::{DepartmentRepository, EmployeeRepository};
use crate::error::{AppError, Result};
use crate::mapper::EmployeeMapper;
use crate::models::{DepartmentRef, Employee, EmployeePatch, EmployeeRequest, EmployeeResponse, ManagerRef};

const ENTITY: &str = "Employee";

/// Employee use cases.
///
/// Every response is produced by the injected mapper from a record returned by
/// the repository. Request validation always runs before the existence check.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    departments: Arc<dyn DepartmentRepository>,
    mapper: Arc<dyn EmployeeMapper>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
        mapper: Arc<dyn EmployeeMapper>,
    ) -> Self {
        Self {
            employees,
            departments,
            mapper,
        }
    }

    /// List every employee in repository order.
    pub async fn get_all(&self) -> Result<Vec<EmployeeResponse>> {
        let employees = self.employees.find_all().await?;
        debug!(count = employees.len(), "Loaded employees");

        employees.iter().map(|e| self.mapper.to_response(e)).collect()
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EmployeeResponse> {
        let employee = self.find_existing(id).await?;
        self.mapper.to_response(&employee)
    }

    /// Create an employee. Department and manager ids, when given, must exist.
    pub async fn create(&self, request: EmployeeRequest) -> Result<EmployeeResponse> {
        validate_request(&request)?;

        let mut employee = self.mapper.to_entity(&request)?;
        if let Some(department_id) = request.department_id {
            employee.department = Some(self.resolve_department(department_id).await?);
        }
        if let Some(manager_id) = request.manager_id {
            employee.manager = Some(self.resolve_manager(manager_id, None).await?);
        }

        let saved = self.employees.save(employee).await?;
        info!(id = ?saved.id, name = %saved.name, "Employee created");

        self.mapper.to_response(&saved)
    }

    /// Overwrite name, position and salary.
    ///
    /// Department and manager are kept unless the request supplies new ids.
    pub async fn update(&self, id: i32, request: EmployeeRequest) -> Result<EmployeeResponse> {
        let salary = validate_request(&request)?;
        let mut employee = self.find_existing(id).await?;

        employee.name = request.name;
        employee.position = request.position;
        employee.salary = salary;
        if let Some(department_id) = request.department_id {
            employee.department = Some(self.resolve_department(department_id).await?);
        }
        if let Some(manager_id) = request.manager_id {
            employee.manager = Some(self.resolve_manager(manager_id, Some(id)).await?);
        }

        let saved = self.employees.save(employee).await?;
        info!(id, "Employee updated");

        self.mapper.to_response(&saved)
    }

    /// Apply only the supplied fields. A `null` relation id clears the relation.
    pub async fn patch(&self, id: i32, patch: EmployeePatch) -> Result<EmployeeResponse> {
        if let Some(name) = &patch.name {
            require_name(name, "name")?;
        }
        if let Some(salary) = patch.salary {
            check_salary(salary)?;
        }

        let mut employee = self.find_existing(id).await?;

        if let Some(name) = patch.name {
            employee.name = name;
        }
        if let Some(position) = patch.position {
            employee.position = position;
        }
        if let Some(salary) = patch.salary {
            employee.salary = salary;
        }
        match patch.department_id {
            Some(Some(department_id)) => employee.department = Some(self.resolve_department(department_id).await?),
            Some(None) => employee.department = None,
            None => {}
        }
        match patch.manager_id {
            Some(Some(manager_id)) => employee.manager = Some(self.resolve_manager(manager_id, Some(id)).await?),
            Some(None) => employee.manager = None,
            None => {}
        }

        let saved = self.employees.save(employee).await?;
        info!(id, "Employee patched");

        self.mapper.to_response(&saved)
    }

    /// Delete an employee. Missing ids are reported as not found, never passed to the repository.
    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.employees.exists_by_id(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }

        self.employees.delete_by_id(id).await?;
        info!(id, "Employee deleted");
        Ok(())
    }

    async fn find_existing(&self, id: i32) -> Result<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    async fn resolve_department(&self, department_id: i32) -> Result<DepartmentRef> {
        let department = self
            .departments
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::invalid_argument(format!("department {department_id} does not exist")))?;

        Ok(DepartmentRef {
            id: department_id,
            name: department.name,
        })
    }

    async fn resolve_manager(&self, manager_id: i32, employee_id: Option<i32>) -> Result<ManagerRef> {
        if employee_id == Some(manager_id) {
            return Err(AppError::invalid_argument("an employee cannot be their own manager"));
        }

        let manager = self
            .employees
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::invalid_argument(format!("manager {manager_id} does not exist")))?;

        Ok(ManagerRef {
            id: manager_id,
            name: manager.name,
        })
    }
}

/// Validate a full employee request and return its salary.
fn validate_request(request: &EmployeeRequest) -> Result<Decimal> {
    require_name(&request.name, "name")?;
    let salary = request
        .salary
        .ok_or_else(|| AppError::invalid_argument("salary is required"))?;
    check_salary(salary)?;
    Ok(salary)
}

/// Salaries are stored as `NUMERIC(12, 2)`.
const SALARY_SCALE: u32 = 2;
const SALARY_LIMIT: i64 = 10_000_000_000;

fn check_salary(salary: Decimal) -> Result<()> {
    if salary < Decimal::ZERO {
        return Err(AppError::invalid_argument("salary must not be negative"));
    }
    if salary.normalize().scale() > SALARY_SCALE {
        return Err(AppError::invalid_argument(format!(
            "salary must have at most {SALARY_SCALE} decimal places"
        )));
    }
    if salary >= Decimal::from(SALARY_LIMIT) {
        return Err(AppError::invalid_argument(format!("salary must be below {SALARY_LIMIT}")));
    }
    Ok(())
}

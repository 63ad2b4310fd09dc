//! Use-case orchestration over repositories and mappers.
//!
//! Services hold only their injected collaborators, so a single instance is
//! shared across request tasks behind an `Arc`.

pub mod customer;
pub mod department;
pub mod employee;


pub use customer::CustomerService;
pub use department::DepartmentService;
pub use employee::EmployeeService;

use crate::error::{AppError, Result};

/// Reject names that are empty or whitespace only.
fn require_name(name: &str, field: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::invalid_argument(format!("{field} must not be empty")));
    }
    Ok(())
}

//! Domain records and the request/response shapes exchanged over HTTP.

pub mod customer;
pub mod department;
pub mod employee;
mod serde_helpers;

pub use customer::{Customer, CustomerPatch, CustomerRequest, CustomerResponse};
pub use department::{Department, DepartmentPatch, DepartmentRequest, DepartmentResponse};
pub use employee::{DepartmentRef, Employee, EmployeePatch, EmployeeRequest, EmployeeResponse, ManagerRef};

pub use super::customers::Entity as Customers;
pub use super::departments::Entity as Departments;
pub use super::employees::Entity as Employees;

//! Repositories and database connection handling.
//!
//! Each record kind has an async repository trait with a SeaORM implementation
//! for PostgreSQL and an in-memory implementation for dev runs and tests.

pub mod connection;
pub mod customer;
pub mod department;
pub mod employee;
pub mod memory;
pub mod schema;

pub use connection::{TableCounts, connect, ping, server_version, table_counts};
pub use customer::{CustomerRepository, SeaOrmCustomerRepository};
pub use department::{DepartmentRepository, SeaOrmDepartmentRepository};
pub use employee::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use memory::{InMemoryCustomerRepository, InMemoryDepartmentRepository, InMemoryEmployeeRepository};

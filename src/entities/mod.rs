//! SeaORM table entities.

pub mod prelude;

pub mod customers;
pub mod departments;
pub mod employees;

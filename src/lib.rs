pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod models;
pub mod service;

pub use error::{AppError, Result};

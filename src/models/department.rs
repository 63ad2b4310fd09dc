//! Department record and DTOs for create and update operations.

use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;
use crate::error::{AppError, Result};

/// Department record. `id` is `None` until persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: Option<i32>,
    pub name: String,
    pub parent_id: Option<i32>,
    pub display_order: i32,
    pub is_active: bool,
}

/// DTO for creating or fully replacing a department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub display_order: i32,
}

/// DTO for partially updating a department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<DepartmentRequest> for Department {
    fn from(request: DepartmentRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            parent_id: request.parent_id,
            display_order: request.display_order,
            is_active: true,
        }
    }
}

impl TryFrom<Department> for DepartmentResponse {
    type Error = AppError;

    fn try_from(department: Department) -> Result<Self> {
        let id = department
            .id
            .ok_or_else(|| AppError::invalid_argument("department has not been persisted"))?;
        Ok(Self {
            id,
            name: department.name,
            parent_id: department.parent_id,
            display_order: department.display_order,
            is_active: department.is_active,
        })
    }
}

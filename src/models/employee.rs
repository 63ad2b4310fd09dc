//! Employee record and its request/response DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;

/// Department an employee belongs to, resolved to its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRef {
    pub id: i32,
    pub name: String,
}

/// Manager of an employee. Holds the manager's id and name, never the manager record itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerRef {
    pub id: i32,
    pub name: String,
}

/// Employee record.
///
/// `id` is `None` until the repository persists the record; once assigned it never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Option<i32>,
    pub name: String,
    pub position: String,
    pub salary: Decimal,
    pub department: Option<DepartmentRef>,
    pub manager: Option<ManagerRef>,
}

impl Employee {
    /// Whether the record has been saved at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// DTO for creating or fully replacing an employee.
///
/// `salary` accepts integer, decimal or string JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub department_id: Option<i32>,
    #[serde(default)]
    pub manager_id: Option<i32>,
}

/// DTO for partially updating an employee.
///
/// For the relation ids, an absent field keeps the current value, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<Option<i32>>,
}

/// Employee as returned to clients. Relations are rendered as names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub position: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    pub department: Option<String>,
    pub manager: Option<String>,
}

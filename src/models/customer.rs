//! Customer record and DTOs.

use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;
use crate::error::{AppError, Result};

/// Customer record. `id` is `None` until persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// DTO for creating or fully replacing a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// DTO for partially updating a customer. `null` clears an optional contact field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl From<CustomerRequest> for Customer {
    fn from(request: CustomerRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            email: request.email,
            phone: request.phone,
            is_active: true,
        }
    }
}

impl TryFrom<Customer> for CustomerResponse {
    type Error = AppError;

    fn try_from(customer: Customer) -> Result<Self> {
        let id = customer
            .id
            .ok_or_else(|| AppError::invalid_argument("customer has not been persisted"))?;
        Ok(Self {
            id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            is_active: customer.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_to_customer_is_active_and_unsaved() {
        let customer = Customer::from(CustomerRequest {
            name: "Acme".to_string(),
            email: Some("ops@acme.test".to_string()),
            phone: None,
        });
        assert!(customer.id.is_none());
        assert!(customer.is_active);
        assert_eq!(customer.email.as_deref(), Some("ops@acme.test"));
    }

    #[test]
    fn test_unsaved_customer_has_no_response() {
        let customer = Customer::from(CustomerRequest {
            name: "Acme".to_string(),
            ..Default::default()
        });
        assert!(CustomerResponse::try_from(customer).is_err());
    }

    #[test]
    fn test_patch_null_email_clears() {
        let patch: CustomerPatch = serde_json::from_str(r#"{"email":null,"isActive":false}"#).unwrap();
        assert_eq!(patch.email, Some(None));
        assert_eq!(patch.phone, None);
        assert_eq!(patch.is_active, Some(false));
    }
}

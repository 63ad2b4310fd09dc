//! Customer CRUD service.

use std::sync::Arc;

use tracing::{debug, info};

use super::require_name;
use crate::db::CustomerRepository;
use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerPatch, CustomerRequest, CustomerResponse};

const ENTITY: &str = "Customer";

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn get_all(&self) -> Result<Vec<CustomerResponse>> {
        let customers = self.customers.find_all().await?;
        debug!(count = customers.len(), "Loaded customers");

        customers.into_iter().map(CustomerResponse::try_from).collect()
    }

    pub async fn get_by_id(&self, id: i32) -> Result<CustomerResponse> {
        self.find_existing(id).await?.try_into()
    }

    pub async fn create(&self, request: CustomerRequest) -> Result<CustomerResponse> {
        require_name(&request.name, "name")?;
        check_email(request.email.as_deref())?;

        let saved = self.customers.save(Customer::from(request)).await?;
        info!(id = ?saved.id, "Customer created");

        saved.try_into()
    }

    /// Overwrite name and contact fields. The active flag is kept.
    pub async fn update(&self, id: i32, request: CustomerRequest) -> Result<CustomerResponse> {
        require_name(&request.name, "name")?;
        check_email(request.email.as_deref())?;
        let mut customer = self.find_existing(id).await?;

        customer.name = request.name;
        customer.email = request.email;
        customer.phone = request.phone;

        let saved = self.customers.save(customer).await?;
        info!(id, "Customer updated");

        saved.try_into()
    }

    pub async fn patch(&self, id: i32, patch: CustomerPatch) -> Result<CustomerResponse> {
        if let Some(name) = &patch.name {
            require_name(name, "name")?;
        }
        if let Some(email) = &patch.email {
            check_email(email.as_deref())?;
        }
        let mut customer = self.find_existing(id).await?;

        if let Some(name) = patch.name {
            customer.name = name;
        }
        if let Some(email) = patch.email {
            customer.email = email;
        }
        if let Some(phone) = patch.phone {
            customer.phone = phone;
        }
        if let Some(is_active) = patch.is_active {
            customer.is_active = is_active;
        }

        let saved = self.customers.save(customer).await?;
        info!(id, "Customer patched");

        saved.try_into()
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.customers.exists_by_id(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }

        self.customers.delete_by_id(id).await?;
        info!(id, "Customer deleted");
        Ok(())
    }

    async fn find_existing(&self, id: i32) -> Result<Customer> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }
}

fn check_email(email: Option<&str>) -> Result<()> {
    match email {
        Some(email) if !email.contains('@') => Err(AppError::invalid_argument(format!(
            "'{email}' is not a valid email address"
        ))),
        _ => Ok(()),
    }
}

//! Customer repository with CRUD operations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::*;

use crate::entities::{customers, prelude::*};
use crate::models::Customer;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DbErr>;

    /// List all customers in stored (id) order.
    async fn find_all(&self) -> Result<Vec<Customer>, DbErr>;

    /// Insert when `id` is `None`, otherwise update. Returns the persisted record.
    async fn save(&self, customer: Customer) -> Result<Customer, DbErr>;

    /// Delete by ID. Returns `false` when no row matched.
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;
}

/// PostgreSQL-backed customer repository.
#[derive(Debug)]
pub struct SeaOrmCustomerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            is_active: model.is_active,
        }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DbErr> {
        Ok(Customers::find_by_id(id).one(self.db.as_ref()).await?.map(Customer::from))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DbErr> {
        let models = Customers::find()
            .order_by_asc(customers::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn save(&self, customer: Customer) -> Result<Customer, DbErr> {
        let mut active = customers::ActiveModel {
            name: Set(customer.name),
            email: Set(customer.email),
            phone: Set(customer.phone),
            is_active: Set(customer.is_active),
            ..Default::default()
        };

        let model = match customer.id {
            Some(id) => {
                active.id = ActiveValue::Unchanged(id);
                active.update(self.db.as_ref()).await?
            }
            None => active.insert(self.db.as_ref()).await?,
        };
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = Customers::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let count = Customers::find_by_id(id).count(self.db.as_ref()).await?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Customers::find().count(self.db.as_ref()).await
    }
}

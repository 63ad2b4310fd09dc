//! Department repository with CRUD operations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::*;

use crate::entities::{departments, prelude::*};
use crate::models::Department;

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Department>, DbErr>;

    /// List all departments ordered by display_order and name.
    async fn find_all(&self) -> Result<Vec<Department>, DbErr>;

    /// Insert when `id` is `None`, otherwise update. Returns the persisted record.
    async fn save(&self, department: Department) -> Result<Department, DbErr>;

    /// Delete by ID. Returns `false` when no row matched.
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;

    /// Check if department name exists (for validation).
    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr>;
}

/// PostgreSQL-backed department repository.
#[derive(Debug)]
pub struct SeaOrmDepartmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDepartmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<departments::Model> for Department {
    fn from(model: departments::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            parent_id: model.parent_id,
            display_order: model.display_order,
            is_active: model.is_active,
        }
    }
}

#[async_trait]
impl DepartmentRepository for SeaOrmDepartmentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Department>, DbErr> {
        Ok(Departments::find_by_id(id).one(self.db.as_ref()).await?.map(Department::from))
    }

    async fn find_all(&self) -> Result<Vec<Department>, DbErr> {
        let models = Departments::find()
            .order_by_asc(departments::Column::DisplayOrder)
            .order_by_asc(departments::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn save(&self, department: Department) -> Result<Department, DbErr> {
        let mut active = departments::ActiveModel {
            name: Set(department.name),
            parent_id: Set(department.parent_id),
            display_order: Set(department.display_order),
            is_active: Set(department.is_active),
            ..Default::default()
        };

        let model = match department.id {
            Some(id) => {
                active.id = ActiveValue::Unchanged(id);
                active.update(self.db.as_ref()).await?
            }
            None => active.insert(self.db.as_ref()).await?,
        };
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = Departments::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let count = Departments::find_by_id(id).count(self.db.as_ref()).await?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Departments::find().count(self.db.as_ref()).await
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = Departments::find().filter(departments::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            query = query.filter(departments::Column::Id.ne(id));
        }

        let count = query.count(self.db.as_ref()).await?;
        Ok(count > 0)
    }
}

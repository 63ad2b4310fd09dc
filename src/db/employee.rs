//! Employee repository with CRUD operations.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::*;

use crate::entities::{departments, employees, prelude::*};
use crate::models::{DepartmentRef, Employee, ManagerRef};

/// Persistence primitives for employees.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Get employee by ID with department and manager names resolved.
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr>;

    /// List all employees in stored (id) order.
    async fn find_all(&self) -> Result<Vec<Employee>, DbErr>;

    /// Insert when `id` is `None`, otherwise update. Returns the persisted record.
    async fn save(&self, employee: Employee) -> Result<Employee, DbErr>;

    /// Delete by ID. Returns `false` when no row matched.
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;
}

/// PostgreSQL-backed employee repository.
#[derive(Debug)]
pub struct SeaOrmEmployeeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn resolve(&self, model: employees::Model) -> Result<Employee, DbErr> {
        let department = match model.department_id {
            Some(id) => Departments::find_by_id(id)
                .one(self.db.as_ref())
                .await?
                .map(|d| DepartmentRef { id: d.id, name: d.name }),
            None => None,
        };
        let manager = match model.manager_id {
            Some(id) => Employees::find_by_id(id)
                .one(self.db.as_ref())
                .await?
                .map(|m| ManagerRef { id: m.id, name: m.name }),
            None => None,
        };

        Ok(into_employee(model, department, manager))
    }
}

fn into_employee(model: employees::Model, department: Option<DepartmentRef>, manager: Option<ManagerRef>) -> Employee {
    Employee {
        id: Some(model.id),
        name: model.name,
        position: model.position,
        salary: model.salary,
        department,
        manager,
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr> {
        match Employees::find_by_id(id).one(self.db.as_ref()).await? {
            Some(model) => self.resolve(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DbErr> {
        let models = Employees::find()
            .order_by_asc(employees::Column::Id)
            .all(self.db.as_ref())
            .await?;

        // One extra query for department names; managers are in the same result set.
        let department_ids: BTreeSet<i32> = models.iter().filter_map(|m| m.department_id).collect();
        let department_names: HashMap<i32, String> = if department_ids.is_empty() {
            HashMap::new()
        } else {
            Departments::find()
                .filter(departments::Column::Id.is_in(department_ids))
                .all(self.db.as_ref())
                .await?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect()
        };
        let employee_names: HashMap<i32, String> = models.iter().map(|m| (m.id, m.name.clone())).collect();

        Ok(models
            .into_iter()
            .map(|model| {
                let department = model.department_id.and_then(|id| {
                    department_names
                        .get(&id)
                        .map(|name| DepartmentRef { id, name: name.clone() })
                });
                let manager = model.manager_id.and_then(|id| {
                    employee_names
                        .get(&id)
                        .map(|name| ManagerRef { id, name: name.clone() })
                });
                into_employee(model, department, manager)
            })
            .collect())
    }

    async fn save(&self, employee: Employee) -> Result<Employee, DbErr> {
        let Employee {
            id,
            name,
            position,
            salary,
            department,
            manager,
        } = employee;

        let mut active = employees::ActiveModel {
            name: Set(name),
            position: Set(position),
            salary: Set(salary),
            department_id: Set(department.as_ref().map(|d| d.id)),
            manager_id: Set(manager.as_ref().map(|m| m.id)),
            ..Default::default()
        };

        let model = match id {
            Some(id) => {
                active.id = ActiveValue::Unchanged(id);
                active.update(self.db.as_ref()).await?
            }
            None => active.insert(self.db.as_ref()).await?,
        };

        Ok(into_employee(model, department, manager))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = Employees::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let count = Employees::find_by_id(id).count(self.db.as_ref()).await?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Employees::find().count(self.db.as_ref()).await
    }
}

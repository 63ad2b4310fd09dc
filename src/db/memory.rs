//! In-memory repositories.
//!
//! Used by `--in-memory` dev runs and the test suite. Ids are assigned from a
//! per-table counter starting at 1, mirroring a serial primary key.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::customer::CustomerRepository;
use super::department::DepartmentRepository;
use super::employee::EmployeeRepository;
use crate::models::{Customer, Department, DepartmentRef, Employee, ManagerRef};

#[derive(Debug)]
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    /// Update semantics match SeaORM: updating a missing row is an error.
    fn replace(&mut self, id: i32, row: T) -> Result<T, DbErr> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(DbErr::RecordNotUpdated),
        }
    }
}

/// Stored employee row. Relations are kept as ids and resolved on read.
#[derive(Debug, Clone)]
struct EmployeeRow {
    name: String,
    position: String,
    salary: Decimal,
    department_id: Option<i32>,
    manager_id: Option<i32>,
}

impl From<Employee> for EmployeeRow {
    fn from(employee: Employee) -> Self {
        Self {
            name: employee.name,
            position: employee.position,
            salary: employee.salary,
            department_id: employee.department.map(|d| d.id),
            manager_id: employee.manager.map(|m| m.id),
        }
    }
}

/// Employees and departments live together so relation names stay current
/// and deletes can clear references, like the foreign keys do in PostgreSQL.
#[derive(Debug, Default)]
struct Store {
    employees: Table<EmployeeRow>,
    departments: Table<Department>,
}

impl Store {
    fn resolve(&self, id: i32, row: &EmployeeRow) -> Employee {
        let department = row.department_id.and_then(|department_id| {
            self.departments.rows.get(&department_id).map(|d| DepartmentRef {
                id: department_id,
                name: d.name.clone(),
            })
        });
        let manager = row.manager_id.and_then(|manager_id| {
            self.employees.rows.get(&manager_id).map(|m| ManagerRef {
                id: manager_id,
                name: m.name.clone(),
            })
        });

        Employee {
            id: Some(id),
            name: row.name.clone(),
            position: row.position.clone(),
            salary: row.salary,
            department,
            manager,
        }
    }
}

type SharedStore = Arc<RwLock<Store>>;

#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    store: SharedStore,
}

impl InMemoryEmployeeRepository {
    /// Standalone store; department references never resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share storage with `departments` so department names resolve on read.
    pub fn with_departments(departments: &InMemoryDepartmentRepository) -> Self {
        Self {
            store: departments.store.clone(),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DbErr> {
        let store = self.store.read().await;
        Ok(store.employees.rows.get(&id).map(|row| store.resolve(id, row)))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DbErr> {
        let store = self.store.read().await;
        Ok(store
            .employees
            .rows
            .iter()
            .map(|(id, row)| store.resolve(*id, row))
            .collect())
    }

    async fn save(&self, employee: Employee) -> Result<Employee, DbErr> {
        let mut store = self.store.write().await;
        let id = employee.id;
        let row = EmployeeRow::from(employee);
        let id = match id {
            Some(id) => {
                store.employees.replace(id, row.clone())?;
                id
            }
            None => {
                let id = store.employees.next_id();
                store.employees.rows.insert(id, row.clone());
                id
            }
        };
        Ok(store.resolve(id, &row))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let mut store = self.store.write().await;
        let removed = store.employees.rows.remove(&id).is_some();
        if removed {
            // Same effect as ON DELETE SET NULL on manager_id.
            for row in store.employees.rows.values_mut() {
                if row.manager_id == Some(id) {
                    row.manager_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.store.read().await.employees.rows.contains_key(&id))
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Ok(self.store.read().await.employees.rows.len() as u64)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDepartmentRepository {
    store: SharedStore,
}

impl InMemoryDepartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Department>, DbErr> {
        Ok(self.store.read().await.departments.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Department>, DbErr> {
        let mut departments: Vec<Department> = self.store.read().await.departments.rows.values().cloned().collect();
        departments.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(departments)
    }

    async fn save(&self, mut department: Department) -> Result<Department, DbErr> {
        let mut store = self.store.write().await;
        match department.id {
            Some(id) => store.departments.replace(id, department),
            None => {
                let id = store.departments.next_id();
                department.id = Some(id);
                store.departments.rows.insert(id, department.clone());
                Ok(department)
            }
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let mut store = self.store.write().await;
        let removed = store.departments.rows.remove(&id).is_some();
        if removed {
            for department in store.departments.rows.values_mut() {
                if department.parent_id == Some(id) {
                    department.parent_id = None;
                }
            }
            for row in store.employees.rows.values_mut() {
                if row.department_id == Some(id) {
                    row.department_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.store.read().await.departments.rows.contains_key(&id))
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Ok(self.store.read().await.departments.rows.len() as u64)
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        Ok(self
            .store
            .read()
            .await
            .departments
            .rows
            .iter()
            .any(|(id, d)| d.name == name && Some(*id) != exclude_id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    table: RwLock<Table<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DbErr> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DbErr> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, mut customer: Customer) -> Result<Customer, DbErr> {
        let mut table = self.table.write().await;
        match customer.id {
            Some(id) => table.replace(id, customer),
            None => {
                let id = table.next_id();
                customer.id = Some(id);
                table.rows.insert(id, customer.clone());
                Ok(customer)
            }
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn count(&self) -> Result<u64, DbErr> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str) -> Employee {
        Employee {
            id: None,
            name: name.to_string(),
            position: "Engineer".to_string(),
            salary: Decimal::from(100),
            department: None,
            manager: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let repo = InMemoryEmployeeRepository::new();

        let first = repo.save(employee("Ann")).await.unwrap();
        let second = repo.save(employee("Bob")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_fails() {
        let repo = InMemoryEmployeeRepository::new();
        let mut ghost = employee("Ghost");
        ghost.id = Some(42);

        let err = repo.save(ghost).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotUpdated));
    }

    #[tokio::test]
    async fn test_delete_missing_id_reports_false() {
        let repo = InMemoryEmployeeRepository::new();
        assert!(!repo.delete_by_id(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_clears_manager_references() {
        let repo = InMemoryEmployeeRepository::new();
        let boss = repo.save(employee("Lance")).await.unwrap();
        let mut report = employee("Ann");
        report.manager = Some(crate::models::ManagerRef {
            id: boss.id.unwrap(),
            name: boss.name.clone(),
        });
        let report = repo.save(report).await.unwrap();

        assert!(repo.delete_by_id(boss.id.unwrap()).await.unwrap());

        let reloaded = repo.find_by_id(report.id.unwrap()).await.unwrap().unwrap();
        assert!(reloaded.manager.is_none());
    }

    #[tokio::test]
    async fn test_departments_sorted_by_display_order_then_name() {
        let repo = InMemoryDepartmentRepository::new();
        for (name, order) in [("Sales", 2), ("Finance", 1), ("Audit", 2)] {
            repo.save(Department {
                id: None,
                name: name.to_string(),
                parent_id: None,
                display_order: order,
                is_active: true,
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Finance", "Audit", "Sales"]);
    }

    #[tokio::test]
    async fn test_department_name_exists_honours_exclusion() {
        let repo = InMemoryDepartmentRepository::new();
        let sales = repo
            .save(Department {
                id: None,
                name: "Sales".to_string(),
                parent_id: None,
                display_order: 0,
                is_active: true,
            })
            .await
            .unwrap();

        assert!(repo.name_exists("Sales", None).await.unwrap());
        assert!(!repo.name_exists("Sales", sales.id).await.unwrap());
        assert!(!repo.name_exists("Finance", None).await.unwrap());
    }

    type Seeded = (InMemoryDepartmentRepository, InMemoryEmployeeRepository, i32, i32);

    async fn department_with_employee(name: &str) -> Seeded {
        let departments = InMemoryDepartmentRepository::new();
        let employees = InMemoryEmployeeRepository::with_departments(&departments);
        let department = departments
            .save(Department {
                id: None,
                name: name.to_string(),
                parent_id: None,
                display_order: 0,
                is_active: true,
            })
            .await
            .unwrap();
        let department_id = department.id.unwrap();

        let mut ann = employee("Ann");
        ann.department = Some(DepartmentRef {
            id: department_id,
            name: department.name,
        });
        let ann = employees.save(ann).await.unwrap();

        (departments, employees, department_id, ann.id.unwrap())
    }

    #[tokio::test]
    async fn test_department_rename_is_visible_on_employee() {
        let (departments, employees, department_id, ann_id) = department_with_employee("Sales").await;

        let mut sales = departments.find_by_id(department_id).await.unwrap().unwrap();
        sales.name = "Revenue".to_string();
        departments.save(sales).await.unwrap();

        let ann = employees.find_by_id(ann_id).await.unwrap().unwrap();
        assert_eq!(ann.department.map(|d| d.name).as_deref(), Some("Revenue"));
        let all = employees.find_all().await.unwrap();
        assert_eq!(all[0].department.as_ref().map(|d| d.name.as_str()), Some("Revenue"));
    }

    #[tokio::test]
    async fn test_department_delete_clears_employee_department() {
        let (departments, employees, department_id, ann_id) = department_with_employee("Sales").await;

        assert!(departments.delete_by_id(department_id).await.unwrap());

        let ann = employees.find_by_id(ann_id).await.unwrap().unwrap();
        assert!(ann.department.is_none());

        // The cleared reference stays cleared when the record is written back.
        let saved = employees.save(ann).await.unwrap();
        assert!(saved.department.is_none());
    }

    #[tokio::test]
    async fn test_manager_rename_is_visible_on_report() {
        let repo = InMemoryEmployeeRepository::new();
        let mut boss = repo.save(employee("Lance")).await.unwrap();
        let mut report = employee("Ann");
        report.manager = Some(ManagerRef {
            id: boss.id.unwrap(),
            name: boss.name.clone(),
        });
        let report = repo.save(report).await.unwrap();

        boss.name = "Lancelot".to_string();
        repo.save(boss).await.unwrap();

        let reloaded = repo.find_by_id(report.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(reloaded.manager.map(|m| m.name).as_deref(), Some("Lancelot"));
    }
}

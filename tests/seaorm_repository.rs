//! SeaORM repository tests against a mock PostgreSQL connection.
//!
//! Query results are consumed in the order the repository issues queries.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

use staff_registry::db::schema::create_schema;
use staff_registry::db::{TableCounts, ping, server_version, table_counts};
use staff_registry::db::{
    CustomerRepository, DepartmentRepository, EmployeeRepository, SeaOrmCustomerRepository,
    SeaOrmDepartmentRepository, SeaOrmEmployeeRepository,
};
use staff_registry::entities::{customers, departments, employees};
use staff_registry::models::{DepartmentRef, Employee};

fn employee_row(
    id: i32,
    name: &str,
    salary: i64,
    department_id: Option<i32>,
    manager_id: Option<i32>,
) -> employees::Model {
    employees::Model {
        id,
        name: name.to_string(),
        position: "Engineer".to_string(),
        salary: Decimal::from(salary),
        department_id,
        manager_id,
    }
}

fn department_row(id: i32, name: &str) -> departments::Model {
    departments::Model {
        id,
        name: name.to_string(),
        parent_id: None,
        display_order: 0,
        is_active: true,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<employees::Model>::new()])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    assert!(repo.find_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_id_resolves_relations() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![employee_row(2, "Ann", 4000, Some(3), Some(1))]])
        .append_query_results([vec![department_row(3, "Sales")]])
        .append_query_results([vec![employee_row(1, "Lance", 5000, None, None)]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let ann = repo.find_by_id(2).await.unwrap().unwrap();

    assert_eq!(ann.id, Some(2));
    assert_eq!(ann.department.as_ref().map(|d| d.name.as_str()), Some("Sales"));
    assert_eq!(ann.manager.as_ref().map(|m| (m.id, m.name.as_str())), Some((1, "Lance")));
}

#[tokio::test]
async fn test_find_all_resolves_names_in_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            employee_row(1, "Lance", 5000, Some(3), None),
            employee_row(2, "Ann", 4000, None, Some(1)),
        ]])
        .append_query_results([vec![department_row(3, "Sales")]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let all = repo.find_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Lance");
    assert_eq!(all[0].department.as_ref().map(|d| d.name.as_str()), Some("Sales"));
    assert_eq!(all[1].manager.as_ref().map(|m| m.name.as_str()), Some("Lance"));
}

#[tokio::test]
async fn test_find_all_without_departments_issues_one_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![employee_row(1, "Lance", 5000, None, None)]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let all = repo.find_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert!(all[0].department.is_none());
}

#[tokio::test]
async fn test_save_new_employee_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![employee_row(11, "Ann", 4000, Some(3), None)]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let saved = repo
        .save(Employee {
            id: None,
            name: "Ann".to_string(),
            position: "Engineer".to_string(),
            salary: Decimal::from(4000),
            department: Some(DepartmentRef {
                id: 3,
                name: "Sales".to_string(),
            }),
            manager: None,
        })
        .await
        .unwrap();

    assert_eq!(saved.id, Some(11));
    assert_eq!(saved.department.map(|d| d.name), Some("Sales".to_string()));
}

#[tokio::test]
async fn test_save_existing_employee_updates() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![employees::Model {
            position: "Director".to_string(),
            ..employee_row(1, "Lance", 6000, None, None)
        }]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let saved = repo
        .save(Employee {
            id: Some(1),
            name: "Lance".to_string(),
            position: "Director".to_string(),
            salary: Decimal::from(6000),
            department: None,
            manager: None,
        })
        .await
        .unwrap();

    assert_eq!(saved.id, Some(1));
    assert_eq!(saved.position, "Director");
    assert_eq!(saved.salary, Decimal::from(6000));
}

#[tokio::test]
async fn test_delete_reports_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    assert!(repo.delete_by_id(1).await.unwrap());
    assert!(!repo.delete_by_id(1).await.unwrap());
}

#[tokio::test]
async fn test_exists_and_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .append_query_results([[count_row(0)]])
        .append_query_results([[count_row(5)]])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    assert!(repo.exists_by_id(1).await.unwrap());
    assert!(!repo.exists_by_id(2).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_query_error_is_propagated() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let repo = SeaOrmEmployeeRepository::new(Arc::new(db));

    let err = repo.find_all().await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_department_name_exists() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .into_connection();
    let repo = SeaOrmDepartmentRepository::new(Arc::new(db));

    assert!(repo.name_exists("Sales", Some(4)).await.unwrap());
}

#[tokio::test]
async fn test_department_find_all_maps_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![department_row(2, "Finance"), department_row(1, "Sales")]])
        .into_connection();
    let repo = SeaOrmDepartmentRepository::new(Arc::new(db));

    let names: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["Finance", "Sales"]);
}

#[tokio::test]
async fn test_customer_find_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![customers::Model {
            id: 4,
            name: "Acme".to_string(),
            email: Some("ops@acme.test".to_string()),
            phone: None,
            is_active: true,
        }]])
        .into_connection();
    let repo = SeaOrmCustomerRepository::new(Arc::new(db));

    let customer = repo.find_by_id(4).await.unwrap().unwrap();
    assert_eq!(customer.id, Some(4));
    assert_eq!(customer.email.as_deref(), Some("ops@acme.test"));
}

#[tokio::test]
async fn test_create_schema_creates_three_tables_in_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    create_schema(&db).await.unwrap();

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 3);
    let statements: Vec<String> = log.iter().map(|t| format!("{t:?}")).collect();
    assert!(statements[0].contains("departments"));
    assert!(statements[1].contains("employees"));
    assert!(statements[2].contains("customers"));
    assert!(statements.iter().all(|s| s.contains("IF NOT EXISTS")));
}

#[tokio::test]
async fn test_table_counts_queries_each_table() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(2)]])
        .append_query_results([[count_row(7)]])
        .append_query_results([[count_row(1)]])
        .into_connection();

    let counts = table_counts(&db).await.unwrap();

    assert_eq!(
        counts,
        TableCounts {
            departments: 2,
            employees: 7,
            customers: 1,
        }
    );
}

#[tokio::test]
async fn test_server_version_reads_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[BTreeMap::from([("version", Value::from("PostgreSQL 16.4"))])]])
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    assert_eq!(server_version(&db).await.unwrap(), "PostgreSQL 16.4");
    assert_eq!(server_version(&db).await.unwrap(), "Unknown");
}

#[tokio::test]
async fn test_ping_runs_select_one() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    ping(&db).await.unwrap();

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    assert!(format!("{:?}", log[0]).contains("SELECT 1"));
}

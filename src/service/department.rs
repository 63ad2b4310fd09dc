//! Department CRUD service.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::require_name;
use crate::db::DepartmentRepository;
use crate::error::{AppError, Result};
use crate::models::{Department, DepartmentPatch, DepartmentRequest, DepartmentResponse};

const ENTITY: &str = "Department";

#[derive(Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(departments: Arc<dyn DepartmentRepository>) -> Self {
        Self { departments }
    }

    pub async fn get_all(&self) -> Result<Vec<DepartmentResponse>> {
        let departments = self.departments.find_all().await?;
        debug!(count = departments.len(), "Loaded departments");

        departments.into_iter().map(DepartmentResponse::try_from).collect()
    }

    pub async fn get_by_id(&self, id: i32) -> Result<DepartmentResponse> {
        self.find_existing(id).await?.try_into()
    }

    /// Create a department. Names are unique; a parent, when given, must exist.
    pub async fn create(&self, request: DepartmentRequest) -> Result<DepartmentResponse> {
        require_name(&request.name, "name")?;
        self.check_unique_name(&request.name, None).await?;
        if let Some(parent_id) = request.parent_id {
            self.check_parent(parent_id, None).await?;
        }

        let saved = self.departments.save(Department::from(request)).await?;
        info!(id = ?saved.id, name = %saved.name, "Department created");

        saved.try_into()
    }

    /// Overwrite name, parent and display order. The active flag is kept.
    pub async fn update(&self, id: i32, request: DepartmentRequest) -> Result<DepartmentResponse> {
        require_name(&request.name, "name")?;
        let mut department = self.find_existing(id).await?;

        self.check_unique_name(&request.name, Some(id)).await?;
        if let Some(parent_id) = request.parent_id {
            self.check_parent(parent_id, Some(id)).await?;
        }

        department.name = request.name;
        department.parent_id = request.parent_id;
        department.display_order = request.display_order;

        let saved = self.departments.save(department).await?;
        info!(id, "Department updated");

        saved.try_into()
    }

    pub async fn patch(&self, id: i32, patch: DepartmentPatch) -> Result<DepartmentResponse> {
        if let Some(name) = &patch.name {
            require_name(name, "name")?;
        }
        let mut department = self.find_existing(id).await?;

        if let Some(name) = patch.name {
            self.check_unique_name(&name, Some(id)).await?;
            department.name = name;
        }
        if let Some(parent_id) = patch.parent_id {
            if let Some(parent_id) = parent_id {
                self.check_parent(parent_id, Some(id)).await?;
            }
            department.parent_id = parent_id;
        }
        if let Some(display_order) = patch.display_order {
            department.display_order = display_order;
        }
        if let Some(is_active) = patch.is_active {
            department.is_active = is_active;
        }

        let saved = self.departments.save(department).await?;
        info!(id, "Department patched");

        saved.try_into()
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.departments.exists_by_id(id).await? {
            return Err(AppError::not_found(ENTITY, id));
        }

        self.departments.delete_by_id(id).await?;
        info!(id, "Department deleted");
        Ok(())
    }

    async fn find_existing(&self, id: i32) -> Result<Department> {
        self.departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    async fn check_unique_name(&self, name: &str, exclude_id: Option<i32>) -> Result<()> {
        if self.departments.name_exists(name, exclude_id).await? {
            return Err(AppError::invalid_argument(format!("department '{name}' already exists")));
        }
        Ok(())
    }

    /// The parent must exist and must not have `department_id` anywhere up its chain.
    async fn check_parent(&self, parent_id: i32, department_id: Option<i32>) -> Result<()> {
        if department_id == Some(parent_id) {
            return Err(AppError::invalid_argument("a department cannot be its own parent"));
        }
        let Some(parent) = self.departments.find_by_id(parent_id).await? else {
            return Err(AppError::invalid_argument(format!(
                "parent department {parent_id} does not exist"
            )));
        };

        let Some(department_id) = department_id else {
            return Ok(());
        };
        let mut visited = HashSet::from([parent_id]);
        let mut next = parent.parent_id;
        while let Some(ancestor_id) = next {
            if ancestor_id == department_id {
                return Err(AppError::invalid_argument(format!(
                    "department {parent_id} is a descendant of department {department_id}"
                )));
            }
            if !visited.insert(ancestor_id) {
                break;
            }
            next = self
                .departments
                .find_by_id(ancestor_id)
                .await?
                .and_then(|ancestor| ancestor.parent_id);
        }
        Ok(())
    }
}

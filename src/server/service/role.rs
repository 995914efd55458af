use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::role::RoleRepository,
    error::AppError,
    model::role::{CreateRoleParams, Role, UpdateRoleParams},
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a role.
    ///
    /// # Returns
    /// - `Ok(Role)` - Created role
    /// - `Err(AppError::Conflict)` - A role with that name exists
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(name_taken(&params.name));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Role>, AppError> {
        Ok(RoleRepository::new(self.db).find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Role"))
    }

    /// Updates a role, keeping names unique.
    ///
    /// # Returns
    /// - `Ok(Role)` - Updated role
    /// - `Err(AppError::NotFound)` - Role does not exist
    /// - `Err(AppError::Conflict)` - New name belongs to another role
    pub async fn update(&self, id: Uuid, params: UpdateRoleParams) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        if let Some(name) = params.name.as_deref() {
            if name != existing.name && repo.find_by_name(name).await?.is_some() {
                return Err(name_taken(name));
            }
        }

        Ok(repo.update(id, params).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !RoleRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("Role"));
        }

        Ok(())
    }
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Role '{}' already exists", name))
}

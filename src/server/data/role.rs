use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::role::{CreateRoleParams, Role, UpdateRoleParams};

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new role with a generated id.
    ///
    /// # Returns
    /// - `Ok(Role)` - The created role
    /// - `Err(DbErr)` - Database error, including a unique violation on name
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();

        let entity = entity::role::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            permissions: ActiveValue::Set(params.permissions),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Role::from_entity(entity))
    }

    /// Gets every role ordered by name.
    pub async fn find_all(&self) -> Result<Vec<Role>, DbErr> {
        let entities = entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Role::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DbErr> {
        let entity = entity::prelude::Role::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Role::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DbErr> {
        let entity = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.map(Role::from_entity))
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Role)` - Updated role
    /// - `Err(DbErr::RecordNotFound)` - No role with that id
    pub async fn update(&self, id: Uuid, params: UpdateRoleParams) -> Result<Role, DbErr> {
        let mut active = entity::prelude::Role::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Role {} not found", id)))?
            .into_active_model();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(permissions) = params.permissions {
            active.permissions = ActiveValue::Set(Some(permissions));
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Role::from_entity(entity))
    }

    /// Hard deletes a role.
    ///
    /// # Returns
    /// - `Ok(true)` - Role deleted
    /// - `Ok(false)` - No role with that id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Role::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

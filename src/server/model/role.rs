//! Named permission bundles managed through the admin API.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::model::role::{CreateRoleDto, RoleDto, UpdateRoleDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Option<Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            permissions: entity.permissions,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            description: self.description,
            permissions: self.permissions,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRoleParams {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Option<Value>,
    pub is_active: bool,
}

impl CreateRoleParams {
    /// New roles are active unless the request says otherwise.
    pub fn from_dto(dto: CreateRoleDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            permissions: dto.permissions,
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

/// Partial role update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Value>,
    pub is_active: Option<bool>,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            permissions: dto.permissions,
            is_active: dto.is_active,
        }
    }
}

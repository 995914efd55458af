use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::server::util::validation::{validate_object, validate_role_name};

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateRoleDto {
    #[validate(length(min = 1, max = 50), custom(function = "validate_role_name"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_object"))]
    pub permissions: Option<Value>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateRoleDto {
    #[validate(length(min = 1, max = 50), custom(function = "validate_role_name"))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_object"))]
    pub permissions: Option<Value>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Option<Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

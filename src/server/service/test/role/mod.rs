use serde_json::json;
use test_utils::builder::TestBuilder;
use uuid::Uuid;

use crate::server::{
    error::AppError,
    model::role::{CreateRoleParams, UpdateRoleParams},
    service::role::RoleService,
};

mod create;
mod update;

fn role(name: &str) -> CreateRoleParams {
    CreateRoleParams {
        name: name.to_string(),
        description: Some("Can manage community content".to_string()),
        permissions: Some(json!({"posts": ["read", "delete"]})),
        is_active: true,
    }
}

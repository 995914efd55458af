use entity::user::AuthSource;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{health_log::HealthLogRepository, post::PostRepository},
    error::AppError,
    model::user::{CreateUserParams, UpdateUserParams},
    service::user::UserService,
};

mod create;
mod delete;
mod update;

fn registration(email: &str) -> CreateUserParams {
    CreateUserParams {
        email: email.to_string(),
        name: Some("Jordan".to_string()),
        bio: None,
        profile_image: None,
        cover_image: None,
        fitness_goal: Some("Run a marathon".to_string()),
        interests: vec!["running".to_string()],
        supabase_id: None,
        auth_source: AuthSource::Local,
    }
}

use chrono::{DateTime, Utc};
use entity::user::AuthSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateUserDto {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_image: Option<String>,
    #[validate(url)]
    pub cover_image: Option<String>,
    #[validate(length(max = 100))]
    pub fitness_goal: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub interests: Vec<String>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateUserDto {
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_image: Option<String>,
    #[validate(url)]
    pub cover_image: Option<String>,
    #[validate(length(max = 100))]
    pub fitness_goal: Option<String>,
    #[validate(length(max = 20))]
    pub interests: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub fitness_goal: Option<String>,
    pub interests: Vec<String>,
    pub auth_source: AuthSource,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

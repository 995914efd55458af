//! User domain models and parameters.
//!
//! Local user accounts, optionally linked to an identity provider account through
//! `supabase_id`. Includes parameter types for registration, profile updates and the
//! compact summary embedded in posts, comments, members and leaderboards.

use chrono::{DateTime, Utc};
use entity::user::AuthSource;
use uuid::Uuid;

use crate::{
    model::{
        api::UserSummaryDto,
        user::{CreateUserDto, PaginatedUsersDto, UpdateUserDto, UserDto},
    },
    server::util::{json::string_list, pagination::Page},
};

/// Local user account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub fitness_goal: Option<String>,
    pub interests: Vec<String>,
    /// Subject id at the identity provider, when the account is linked.
    pub supabase_id: Option<String>,
    pub auth_source: AuthSource,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            bio: entity.bio,
            profile_image: entity.profile_image,
            cover_image: entity.cover_image,
            fitness_goal: entity.fitness_goal,
            interests: string_list(&entity.interests),
            supabase_id: entity.supabase_id,
            auth_source: entity.auth_source,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The provider subject id is not exposed.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            bio: self.bio,
            profile_image: self.profile_image,
            cover_image: self.cover_image,
            fitness_goal: self.fitness_goal,
            interests: self.interests,
            auth_source: self.auth_source,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Public projection of a user shown next to content they authored.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

impl UserSummary {
    pub fn from_entity(entity: &entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            profile_image: entity.profile_image.clone(),
        }
    }

    /// Placeholder for content whose author row is no longer present.
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            profile_image: None,
        }
    }

    pub fn into_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name,
            profile_image: self.profile_image,
        }
    }
}

/// Parameters for creating a local user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub fitness_goal: Option<String>,
    pub interests: Vec<String>,
    pub supabase_id: Option<String>,
    pub auth_source: AuthSource,
}

impl CreateUserParams {
    /// Builds parameters for a locally registered account.
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            email: dto.email.to_lowercase(),
            name: dto.name,
            bio: dto.bio,
            profile_image: dto.profile_image,
            cover_image: dto.cover_image,
            fitness_goal: dto.fitness_goal,
            interests: dto.interests,
            supabase_id: None,
            auth_source: AuthSource::Local,
        }
    }
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub email: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub fitness_goal: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            email: dto.email.map(|e| e.to_lowercase()),
            name: dto.name,
            bio: dto.bio,
            profile_image: dto.profile_image,
            cover_image: dto.cover_image,
            fitness_goal: dto.fitness_goal,
            interests: dto.interests,
        }
    }
}

pub fn paginated_users_dto(page: Page<User>) -> PaginatedUsersDto {
    let page = page.map(User::into_dto);

    PaginatedUsersDto {
        users: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

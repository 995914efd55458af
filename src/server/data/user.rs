use std::collections::HashMap;

use chrono::Utc;
use entity::user::AuthSource;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    model::user::{CreateUserParams, UpdateUserParams, User, UserSummary},
    util::{
        json::to_json_list,
        pagination::{Page, PageRequest},
    },
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user with a generated id.
    ///
    /// # Arguments
    /// - `params` - Profile fields and provider linkage
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(params.email),
            name: ActiveValue::Set(params.name),
            bio: ActiveValue::Set(params.bio),
            profile_image: ActiveValue::Set(params.profile_image),
            cover_image: ActiveValue::Set(params.cover_image),
            fitness_goal: ActiveValue::Set(params.fitness_goal),
            interests: ActiveValue::Set(to_json_list(&params.interests)),
            supabase_id: ActiveValue::Set(params.supabase_id),
            auth_source: ActiveValue::Set(params.auth_source),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(Expr::cust_with_values("LOWER(email) = ?", [email.to_lowercase()]))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user linked to the given identity provider subject id.
    pub async fn find_by_supabase_id(&self, supabase_id: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::SupabaseId.eq(supabase_id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets users newest first.
    ///
    /// # Arguments
    /// - `request` - Page selection
    ///
    /// # Returns
    /// - `Ok(Page<User>)` - Users for the requested page with total count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, request: PageRequest) -> Result<Page<User>, DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        Ok(Page::new(
            entities.into_iter().map(User::from_entity).collect(),
            total,
            request,
        ))
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(DbErr::RecordNotFound)` - No user with that id
    pub async fn update(&self, id: Uuid, params: UpdateUserParams) -> Result<User, DbErr> {
        let mut active = self.load_active(id).await?;

        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(Some(name));
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(profile_image) = params.profile_image {
            active.profile_image = ActiveValue::Set(Some(profile_image));
        }
        if let Some(cover_image) = params.cover_image {
            active.cover_image = ActiveValue::Set(Some(cover_image));
        }
        if let Some(fitness_goal) = params.fitness_goal {
            active.fitness_goal = ActiveValue::Set(Some(fitness_goal));
        }
        if let Some(interests) = params.interests {
            active.interests = ActiveValue::Set(to_json_list(&interests));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    /// Links an existing local account to an identity provider subject.
    pub async fn link_supabase(&self, id: Uuid, supabase_id: &str) -> Result<User, DbErr> {
        let mut active = self.load_active(id).await?;
        active.supabase_id = ActiveValue::Set(Some(supabase_id.to_string()));
        active.auth_source = ActiveValue::Set(AuthSource::Supabase);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<User, DbErr> {
        let mut active = self.load_active(id).await?;
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    /// Hard deletes a user. Owned rows are removed by cascading foreign keys.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Loads author summaries for a set of user ids in one query.
    pub async fn find_summaries(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, UserSummary>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities
            .iter()
            .map(|e| (e.id, UserSummary::from_entity(e)))
            .collect())
    }

    /// Returns the ids among `ids` that exist.
    pub async fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, DbErr> {
        Ok(self.find_summaries(ids).await?.into_keys().collect())
    }

    async fn load_active(&self, id: Uuid) -> Result<entity::user::ActiveModel, DbErr> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(IntoActiveModel::into_active_model)
            .ok_or_else(|| DbErr::RecordNotFound(format!("User {} not found", id)))
    }
}

/// Looks up a preloaded summary, falling back to an anonymous one for missing users.
pub fn summary_or_unknown(summaries: &HashMap<Uuid, UserSummary>, id: Uuid) -> UserSummary {
    summaries
        .get(&id)
        .cloned()
        .unwrap_or_else(|| UserSummary::unknown(id))
}

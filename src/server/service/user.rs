use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, UpdateUserParams, User},
    util::pagination::{Page, PageRequest},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a local user.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn get_paginated(&self, request: PageRequest) -> Result<Page<User>, AppError> {
        Ok(UserRepository::new(self.db).get_paginated(request).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Updates the caller's own profile.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::Forbidden)` - Caller is not the target user
    /// - `Err(AppError::NotFound)` - User does not exist
    /// - `Err(AppError::Conflict)` - New email belongs to another account
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateUserParams,
    ) -> Result<User, AppError> {
        ensure_self(caller_id, id, "You can only update your own profile")?;

        let repo = UserRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        if let Some(email) = params.email.as_deref() {
            if email != existing.email {
                if let Some(other) = repo.find_by_email(email).await? {
                    if other.id != id {
                        return Err(AppError::Conflict("Email is already registered".to_string()));
                    }
                }
            }
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes the caller's own account together with everything it owns.
    pub async fn delete(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        ensure_self(caller_id, id, "You can only delete your own account")?;

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("User"));
        }

        Ok(())
    }
}

/// Rejects operations on another user's per-user data with 403.
pub fn ensure_self(caller_id: Uuid, user_id: Uuid, message: &str) -> Result<(), AppError> {
    if caller_id != user_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}

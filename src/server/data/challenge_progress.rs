use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::challenge::{ChallengeProgress, RecordProgressParams};

pub struct ChallengeProgressRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChallengeProgressRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or replaces the entry for (challenge, user, date).
    ///
    /// # Arguments
    /// - `params` - Day being recorded and its raw progress data
    /// - `completion_percentage` - Completion already computed against the challenge goal
    pub async fn upsert(
        &self,
        params: RecordProgressParams,
        completion_percentage: f64,
    ) -> Result<ChallengeProgress, DbErr> {
        let now = Utc::now();
        let is_completed = completion_percentage >= 100.0;

        let existing = entity::prelude::ChallengeProgress::find()
            .filter(entity::challenge_progress::Column::ChallengeId.eq(params.challenge_id))
            .filter(entity::challenge_progress::Column::UserId.eq(params.user_id))
            .filter(entity::challenge_progress::Column::Date.eq(params.date))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.progress_data = ActiveValue::Set(params.progress_data);
                active.notes = ActiveValue::Set(params.notes);
                active.completion_percentage = ActiveValue::Set(completion_percentage);
                active.is_completed = ActiveValue::Set(is_completed);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::challenge_progress::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    challenge_id: ActiveValue::Set(params.challenge_id),
                    user_id: ActiveValue::Set(params.user_id),
                    date: ActiveValue::Set(params.date),
                    progress_data: ActiveValue::Set(params.progress_data),
                    completion_percentage: ActiveValue::Set(completion_percentage),
                    is_completed: ActiveValue::Set(is_completed),
                    notes: ActiveValue::Set(params.notes),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(ChallengeProgress::from_entity(entity))
    }

    /// Entries of one user in one challenge, oldest first.
    pub async fn find_for_user(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChallengeProgress>, DbErr> {
        Ok(entity::prelude::ChallengeProgress::find()
            .filter(entity::challenge_progress::Column::ChallengeId.eq(challenge_id))
            .filter(entity::challenge_progress::Column::UserId.eq(user_id))
            .order_by_asc(entity::challenge_progress::Column::Date)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChallengeProgress::from_entity)
            .collect())
    }

    pub async fn find_for_challenge(
        &self,
        challenge_id: Uuid,
    ) -> Result<Vec<ChallengeProgress>, DbErr> {
        Ok(entity::prelude::ChallengeProgress::find()
            .filter(entity::challenge_progress::Column::ChallengeId.eq(challenge_id))
            .order_by_asc(entity::challenge_progress::Column::Date)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChallengeProgress::from_entity)
            .collect())
    }

    /// Deletes progress for one user, or for every user when `user_id` is `None`.
    pub async fn delete(&self, challenge_id: Uuid, user_id: Option<Uuid>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::ChallengeProgress::delete_many()
            .filter(entity::challenge_progress::Column::ChallengeId.eq(challenge_id));

        if let Some(user_id) = user_id {
            query = query.filter(entity::challenge_progress::Column::UserId.eq(user_id));
        }

        Ok(query.exec(self.db).await?.rows_affected)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

pub struct ChallengeParticipantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChallengeParticipantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> Result<entity::challenge_participant::Model, DbErr> {
        entity::challenge_participant::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            challenge_id: ActiveValue::Set(challenge_id),
            user_id: ActiveValue::Set(user_id),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    pub async fn exists(&self, challenge_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        Ok(entity::prelude::ChallengeParticipant::find()
            .filter(entity::challenge_participant::Column::ChallengeId.eq(challenge_id))
            .filter(entity::challenge_participant::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .is_some())
    }

    /// Removes one participant. Returns whether a row was deleted.
    pub async fn delete(&self, challenge_id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::ChallengeParticipant::delete_many()
            .filter(entity::challenge_participant::Column::ChallengeId.eq(challenge_id))
            .filter(entity::challenge_participant::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_all(&self, challenge_id: Uuid) -> Result<u64, DbErr> {
        let result = entity::prelude::ChallengeParticipant::delete_many()
            .filter(entity::challenge_participant::Column::ChallengeId.eq(challenge_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

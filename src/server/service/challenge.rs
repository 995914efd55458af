use chrono::Utc;
use entity::challenge::ChallengeStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        challenge::ChallengeRepository, challenge_participant::ChallengeParticipantRepository,
        challenge_progress::ChallengeProgressRepository, user::UserRepository,
    },
    error::AppError,
    model::challenge::{
        completion_percentage, leaderboard, Challenge, ChallengeFilter, ChallengeProgress,
        CreateChallengeParams, LeaderboardEntry, RecordProgressParams, UpdateChallengeParams,
    },
    util::pagination::{Page, PageRequest},
};

pub struct ChallengeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChallengeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a challenge authored by the caller.
    ///
    /// # Returns
    /// - `Ok(Challenge)` - Created challenge with computed `end_date`
    /// - `Err(AppError::BadRequest)` - Start date is in the past
    pub async fn create(&self, params: CreateChallengeParams) -> Result<Challenge, AppError> {
        if params.start_date < Utc::now().date_naive() {
            return Err(AppError::BadRequest(
                "Start date cannot be in the past".to_string(),
            ));
        }

        Ok(ChallengeRepository::new(self.db).create(params).await?)
    }

    pub async fn find_public(
        &self,
        filter: ChallengeFilter,
        request: PageRequest,
    ) -> Result<Page<Challenge>, AppError> {
        Ok(ChallengeRepository::new(self.db)
            .find_public(&filter, request)
            .await?)
    }

    pub async fn find_by_creator(
        &self,
        creator_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Challenge>, AppError> {
        Ok(ChallengeRepository::new(self.db)
            .find_by_creator(creator_id, request)
            .await?)
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Challenge>, AppError> {
        Ok(ChallengeRepository::new(self.db)
            .find_by_participant(user_id, request)
            .await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Challenge, AppError> {
        ChallengeRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Challenge"))
    }

    /// Updates a challenge owned by the caller.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller is not the creator
    /// - `Err(AppError::Conflict)` - Challenge is active and has participants
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateChallengeParams,
    ) -> Result<Challenge, AppError> {
        let challenge = self.get(id).await?;
        ensure_editable(&challenge, caller_id, "You can only update your own challenges")?;

        Ok(ChallengeRepository::new(self.db).update(id, params).await?)
    }

    /// Deletes a challenge with its participants and progress.
    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let challenge = self.get(id).await?;
        ensure_editable(&challenge, caller_id, "You can only delete your own challenges")?;

        let txn = self.db.begin().await?;
        ChallengeProgressRepository::new(&txn).delete(id, None).await?;
        ChallengeParticipantRepository::new(&txn).delete_all(id).await?;
        ChallengeRepository::new(&txn).delete(id).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Adds the caller as a participant.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Challenge does not exist
    /// - `Err(AppError::Conflict)` - Not open for joining, already joined, or full
    pub async fn join(&self, caller_id: Uuid, id: Uuid) -> Result<Challenge, AppError> {
        let txn = self.db.begin().await?;
        let challenges = ChallengeRepository::new(&txn);
        let participants = ChallengeParticipantRepository::new(&txn);

        let challenge = challenges
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Challenge"))?;

        if !challenge.is_joinable() {
            return Err(AppError::Conflict(
                "Challenge is not available for joining".to_string(),
            ));
        }
        if participants.exists(id, caller_id).await? {
            return Err(AppError::Conflict(
                "You are already participating in this challenge".to_string(),
            ));
        }
        if challenge.is_full() {
            return Err(AppError::Conflict(
                "Challenge has reached maximum participants".to_string(),
            ));
        }

        participants.create(id, caller_id).await?;
        let challenge = challenges
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Challenge"))?;

        txn.commit().await?;

        Ok(challenge)
    }

    /// Removes the caller from a challenge together with their progress.
    pub async fn leave(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.get(id).await?;

        let txn = self.db.begin().await?;
        if !ChallengeParticipantRepository::new(&txn)
            .delete(id, caller_id)
            .await?
        {
            return Err(AppError::not_found("Participation"));
        }
        ChallengeProgressRepository::new(&txn)
            .delete(id, Some(caller_id))
            .await?;
        txn.commit().await?;

        Ok(())
    }

    /// Records or replaces the caller's progress for one day.
    ///
    /// # Returns
    /// - `Ok(ChallengeProgress)` - Stored entry with computed completion
    /// - `Err(AppError::Conflict)` - Caller is not a participant
    /// - `Err(AppError::BadRequest)` - Date outside the challenge period
    pub async fn record_progress(
        &self,
        params: RecordProgressParams,
    ) -> Result<ChallengeProgress, AppError> {
        let challenge = self.get(params.challenge_id).await?;

        if !ChallengeParticipantRepository::new(self.db)
            .exists(challenge.id, params.user_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You are not a participant in this challenge".to_string(),
            ));
        }
        if !challenge.covers(params.date) {
            return Err(AppError::BadRequest(
                "Progress date is outside the challenge period".to_string(),
            ));
        }

        let completion = completion_percentage(&challenge.goal, &params.progress_data);

        Ok(ChallengeProgressRepository::new(self.db)
            .upsert(params, completion)
            .await?)
    }

    /// A user's entries in a challenge, oldest first.
    pub async fn user_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChallengeProgress>, AppError> {
        self.get(id).await?;
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }

        Ok(ChallengeProgressRepository::new(self.db)
            .find_for_user(id, user_id)
            .await?)
    }

    pub async fn leaderboard(&self, id: Uuid) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.get(id).await?;

        let entries = ChallengeProgressRepository::new(self.db)
            .find_for_challenge(id)
            .await?;

        let mut user_ids: Vec<Uuid> = entries.iter().map(|e| e.user_id).collect();
        user_ids.sort();
        user_ids.dedup();
        let users = UserRepository::new(self.db).find_summaries(&user_ids).await?;

        Ok(leaderboard(&entries, &users))
    }
}

fn ensure_editable(challenge: &Challenge, caller_id: Uuid, message: &str) -> Result<(), AppError> {
    if challenge.creator_id != caller_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    if challenge.status == ChallengeStatus::Active && challenge.participants_count > 0 {
        return Err(AppError::Conflict(
            "Active challenges with participants cannot be modified".to_string(),
        ));
    }
    Ok(())
}

//! Challenge, participant and progress factories.

use chrono::{Duration, NaiveDate, Utc};
use entity::challenge::{ChallengeDifficulty, ChallengeStatus, ChallengeType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating challenges.
///
/// Defaults to a 30 day public draft steps challenge starting today with a goal of
/// 10000 steps and unlimited participants.
pub struct ChallengeFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: Uuid,
    title: String,
    challenge_type: ChallengeType,
    difficulty: ChallengeDifficulty,
    goal: Value,
    start_date: NaiveDate,
    duration_days: i32,
    status: ChallengeStatus,
    is_public: bool,
    max_participants: i32,
}

impl<'a> ChallengeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, creator_id: Uuid) -> Self {
        Self {
            db,
            creator_id,
            title: format!("Challenge {}", next_id()),
            challenge_type: ChallengeType::Steps,
            difficulty: ChallengeDifficulty::Beginner,
            goal: json!({"target": 10000, "unit": "steps"}),
            start_date: Utc::now().date_naive(),
            duration_days: 30,
            status: ChallengeStatus::Draft,
            is_public: true,
            max_participants: 0,
        }
    }

    pub fn challenge_type(mut self, challenge_type: ChallengeType) -> Self {
        self.challenge_type = challenge_type;
        self
    }

    pub fn difficulty(mut self, difficulty: ChallengeDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn goal(mut self, goal: Value) -> Self {
        self.goal = goal;
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn duration_days(mut self, duration_days: i32) -> Self {
        self.duration_days = duration_days;
        self
    }

    pub fn status(mut self, status: ChallengeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn max_participants(mut self, max_participants: i32) -> Self {
        self.max_participants = max_participants;
        self
    }

    pub async fn build(self) -> Result<entity::challenge::Model, DbErr> {
        let now = Utc::now();
        let end_date = self.start_date + Duration::days(i64::from(self.duration_days) - 1);

        entity::challenge::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            creator_id: ActiveValue::Set(self.creator_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("Walk every single day".to_string()),
            challenge_type: ActiveValue::Set(self.challenge_type),
            difficulty: ActiveValue::Set(self.difficulty),
            goal: ActiveValue::Set(self.goal),
            duration_days: ActiveValue::Set(self.duration_days),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(end_date),
            status: ActiveValue::Set(self.status),
            is_public: ActiveValue::Set(self.is_public),
            max_participants: ActiveValue::Set(self.max_participants),
            rewards: ActiveValue::Set(None),
            rules: ActiveValue::Set(None),
            image_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default draft challenge for `creator_id`.
pub async fn create_challenge(
    db: &DatabaseConnection,
    creator_id: Uuid,
) -> Result<entity::challenge::Model, DbErr> {
    ChallengeFactory::new(db, creator_id).build().await
}

pub async fn create_participant(
    db: &DatabaseConnection,
    challenge_id: Uuid,
    user_id: Uuid,
) -> Result<entity::challenge_participant::Model, DbErr> {
    entity::challenge_participant::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        challenge_id: ActiveValue::Set(challenge_id),
        user_id: ActiveValue::Set(user_id),
        joined_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Inserts a progress row with a precomputed completion percentage.
///
/// `is_completed` is derived as `completion_percentage >= 100`.
pub async fn create_progress(
    db: &DatabaseConnection,
    challenge_id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    completion_percentage: f64,
) -> Result<entity::challenge_progress::Model, DbErr> {
    let now = Utc::now();
    entity::challenge_progress::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        challenge_id: ActiveValue::Set(challenge_id),
        user_id: ActiveValue::Set(user_id),
        date: ActiveValue::Set(date),
        progress_data: ActiveValue::Set(json!({"steps": completion_percentage * 100.0})),
        completion_percentage: ActiveValue::Set(completion_percentage),
        is_completed: ActiveValue::Set(completion_percentage >= 100.0),
        notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

use chrono::{DateTime, NaiveDate, Utc};
use entity::challenge::{ChallengeDifficulty, ChallengeStatus, ChallengeType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::api::UserSummaryDto,
    server::util::validation::{validate_goal, validate_non_empty_object},
};

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateChallengeDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 10, max = 2000))]
    pub description: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub difficulty: ChallengeDifficulty,
    #[validate(custom(function = "validate_goal"))]
    pub goal: Value,
    #[validate(range(min = 1, max = 365))]
    pub duration_days: i32,
    pub start_date: NaiveDate,
    pub status: Option<ChallengeStatus>,
    pub is_public: Option<bool>,
    #[validate(range(min = 0, max = 10000))]
    pub max_participants: Option<i32>,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateChallengeDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 2000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub challenge_type: Option<ChallengeType>,
    pub difficulty: Option<ChallengeDifficulty>,
    #[validate(custom(function = "validate_goal"))]
    pub goal: Option<Value>,
    #[validate(range(min = 1, max = 365))]
    pub duration_days: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<ChallengeStatus>,
    pub is_public: Option<bool>,
    #[validate(range(min = 0, max = 10000))]
    pub max_participants: Option<i32>,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct RecordProgressDto {
    pub date: NaiveDate,
    #[validate(custom(function = "validate_non_empty_object"))]
    pub progress_data: Value,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ChallengeListQuery {
    #[serde(rename = "type")]
    pub challenge_type: Option<ChallengeType>,
    pub difficulty: Option<ChallengeDifficulty>,
    pub status: Option<ChallengeStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChallengeDto {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub difficulty: ChallengeDifficulty,
    pub goal: Value,
    pub duration_days: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ChallengeStatus,
    pub is_public: bool,
    pub max_participants: i32,
    pub participants_count: u64,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedChallengesDto {
    pub challenges: Vec<ChallengeDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProgressDto {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub progress_data: Value,
    pub completion_percentage: f64,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProgressSummaryDto {
    pub total_days: u64,
    pub completed_days: u64,
    pub average_completion: f64,
    pub current_streak: u64,
    pub best_day: Option<ProgressDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserProgressDto {
    pub progress: Vec<ProgressDto>,
    pub summary: ProgressSummaryDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeaderboardEntryDto {
    pub rank: u64,
    pub user: UserSummaryDto,
    pub avg_completion: f64,
    pub completed_days: u64,
    pub total_entries: u64,
}

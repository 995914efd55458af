use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsType {
    #[sea_orm(string_value = "weight_tracking")]
    WeightTracking,
    #[sea_orm(string_value = "workout_summary")]
    WorkoutSummary,
    #[sea_orm(string_value = "nutrition_analysis")]
    NutritionAnalysis,
    #[sea_orm(string_value = "sleep_pattern")]
    SleepPattern,
    #[sea_orm(string_value = "mood_tracking")]
    MoodTracking,
    #[sea_orm(string_value = "progress_milestone")]
    ProgressMilestone,
    #[sea_orm(string_value = "challenge_performance")]
    ChallengePerformance,
    #[sea_orm(string_value = "social_engagement")]
    SocialEngagement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub analytics_type: AnalyticsType,
    pub period_type: PeriodType,
    pub period_start: Date,
    pub period_end: Date,
    pub metrics: Json,
    pub insights: Option<Json>,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    pub goals_progress: Option<Json>,
    pub comparisons: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

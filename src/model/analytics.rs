use chrono::{DateTime, NaiveDate, Utc};
use entity::{
    analytics::{AnalyticsType, PeriodType},
    dashboard_settings::{Theme, UnitsPreference},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::server::util::validation::validate_non_empty_object;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateAnalyticsDto {
    #[serde(rename = "type")]
    pub analytics_type: AnalyticsType,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[validate(custom(function = "validate_non_empty_object"))]
    pub metrics: Value,
    pub insights: Option<Value>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,
    pub goals_progress: Option<Value>,
    pub comparisons: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateAnalyticsDto {
    #[serde(rename = "type")]
    pub analytics_type: Option<AnalyticsType>,
    pub period_type: Option<PeriodType>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    #[validate(custom(function = "validate_non_empty_object"))]
    pub metrics: Option<Value>,
    pub insights: Option<Value>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,
    pub goals_progress: Option<Value>,
    pub comparisons: Option<Value>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AnalyticsListQuery {
    #[serde(rename = "type")]
    pub analytics_type: Option<AnalyticsType>,
    pub period_type: Option<PeriodType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyticsDto {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub analytics_type: AnalyticsType,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub metrics: Value,
    pub insights: Option<Value>,
    pub score: Option<f64>,
    pub goals_progress: Option<Value>,
    pub comparisons: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedAnalyticsDto {
    pub analytics: Vec<AnalyticsDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DashboardQuery {
    pub period: Option<PeriodType>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardOverviewDto {
    pub total_analytics: u64,
    pub average_score: f64,
    pub weight_trend: String,
    pub workouts_completed: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightPointDto {
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub change: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorkoutPointDto {
    pub date: NaiveDate,
    pub workouts: f64,
    pub duration: f64,
    pub calories: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScorePointDto {
    pub date: NaiveDate,
    pub score: f64,
    #[serde(rename = "type")]
    pub analytics_type: AnalyticsType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardChartsDto {
    pub weight_chart: Vec<WeightPointDto>,
    pub workout_chart: Vec<WorkoutPointDto>,
    pub score_trend: Vec<ScorePointDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardDto {
    pub overview: DashboardOverviewDto,
    pub charts: DashboardChartsDto,
    pub goals: Map<String, Value>,
    pub insights: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct SaveDashboardSettingsDto {
    pub widget_preferences: Option<Map<String, Value>>,
    pub chart_preferences: Option<Map<String, Value>>,
    pub notification_preferences: Option<Map<String, Value>>,
    pub theme: Option<Theme>,
    pub units_preference: Option<UnitsPreference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardSettingsDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub widget_preferences: Value,
    pub chart_preferences: Value,
    pub notification_preferences: Value,
    pub theme: Theme,
    pub units_preference: UnitsPreference,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

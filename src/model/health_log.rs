use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateHealthLogDto {
    pub date: NaiveDate,
    #[validate(range(min = 0, max = 10000))]
    pub calories: Option<i32>,
    #[validate(range(min = 0, max = 100000))]
    pub steps: Option<i32>,
    #[validate(range(min = 0, max = 10000))]
    pub hydration_ml: Option<i32>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: Option<f64>,
    #[validate(length(max = 500))]
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Value>,
}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct UpdateHealthLogDto {
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 10000))]
    pub calories: Option<i32>,
    #[validate(range(min = 0, max = 100000))]
    pub steps: Option<i32>,
    #[validate(range(min = 0, max = 10000))]
    pub hydration_ml: Option<i32>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: Option<f64>,
    #[validate(length(max = 500))]
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Value>,
}

/// Optional or required date bounds, depending on the route.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthLogDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub calories: Option<i32>,
    pub steps: Option<i32>,
    pub hydration_ml: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedHealthLogsDto {
    pub health_logs: Vec<HealthLogDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DateRangeDto {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthStatsDto {
    pub avg_calories: f64,
    pub avg_steps: f64,
    pub avg_hydration_ml: f64,
    pub avg_sleep_hours: f64,
    pub total_entries: u64,
    pub date_range: DateRangeDto,
}

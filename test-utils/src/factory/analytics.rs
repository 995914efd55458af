//! Analytics row factory.

use chrono::{Duration, Utc};
use entity::analytics::{AnalyticsType, PeriodType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::Value;
use uuid::Uuid;

/// Inserts a daily analytics row for `user_id` whose period started `days_ago` days ago.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owner of the row
/// - `analytics_type` - Row type
/// - `days_ago` - Offset of `period_start` from today
/// - `metrics` - Metrics payload
/// - `score` - Optional score
/// - `insights` - Optional insights payload
pub async fn create_analytics(
    db: &DatabaseConnection,
    user_id: Uuid,
    analytics_type: AnalyticsType,
    days_ago: i64,
    metrics: Value,
    score: Option<f64>,
    insights: Option<Value>,
) -> Result<entity::analytics::Model, DbErr> {
    let now = Utc::now();
    let period_start = now.date_naive() - Duration::days(days_ago);

    entity::analytics::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(user_id),
        analytics_type: ActiveValue::Set(analytics_type),
        period_type: ActiveValue::Set(PeriodType::Daily),
        period_start: ActiveValue::Set(period_start),
        period_end: ActiveValue::Set(period_start),
        metrics: ActiveValue::Set(metrics),
        insights: ActiveValue::Set(insights),
        score: ActiveValue::Set(score),
        goals_progress: ActiveValue::Set(None),
        comparisons: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

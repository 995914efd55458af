//! Periodic analytics snapshots and the dashboard built from them.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use entity::{
    analytics::{AnalyticsType, PeriodType},
    dashboard_settings::{Theme, UnitsPreference},
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{
    model::analytics::{
        AnalyticsDto, CreateAnalyticsDto, DashboardChartsDto, DashboardDto, DashboardOverviewDto,
        DashboardSettingsDto, PaginatedAnalyticsDto, SaveDashboardSettingsDto, ScorePointDto,
        UpdateAnalyticsDto, WeightPointDto, WorkoutPointDto,
    },
    server::util::{json::object_or_empty, pagination::Page, round1},
};

const MAX_INSIGHTS: usize = 5;
const MAX_ACHIEVEMENTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub id: Uuid,
    pub user_id: Uuid,
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

impl Analytics {
    pub fn from_entity(entity: entity::analytics::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            analytics_type: entity.analytics_type,
            period_type: entity.period_type,
            period_start: entity.period_start,
            period_end: entity.period_end,
            metrics: entity.metrics,
            insights: entity.insights,
            score: entity.score,
            goals_progress: entity.goals_progress,
            comparisons: entity.comparisons,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> AnalyticsDto {
        AnalyticsDto {
            id: self.id,
            user_id: self.user_id,
            analytics_type: self.analytics_type,
            period_type: self.period_type,
            period_start: self.period_start,
            period_end: self.period_end,
            metrics: self.metrics,
            insights: self.insights,
            score: self.score,
            goals_progress: self.goals_progress,
            comparisons: self.comparisons,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).and_then(Value::as_f64)
    }

    fn insight(&self, key: &str) -> Option<&Value> {
        self.insights.as_ref().and_then(|i| i.get(key))
    }
}

/// A period must not end before it starts.
pub fn is_valid_period(start: NaiveDate, end: NaiveDate) -> bool {
    end >= start
}

/// First day of the dashboard window ending on `today`.
pub fn window_start(today: NaiveDate, period: PeriodType) -> NaiveDate {
    let start = match period {
        PeriodType::Daily => today.checked_sub_days(Days::new(1)),
        PeriodType::Weekly => today.checked_sub_days(Days::new(7)),
        PeriodType::Monthly => today.checked_sub_months(Months::new(1)),
        PeriodType::Yearly => today.checked_sub_months(Months::new(12)),
    };

    start.unwrap_or(NaiveDate::MIN)
}

/// Dashboard summary over a window of analytics rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub overview: DashboardOverviewDto,
    pub charts: DashboardChartsDto,
    pub goals: Map<String, Value>,
    pub insights: Vec<String>,
    pub achievements: Vec<String>,
}

impl Dashboard {
    /// Builds the dashboard from rows ordered by `period_start` descending.
    pub fn from_analytics(rows: &[Analytics]) -> Self {
        Self {
            overview: overview(rows),
            charts: DashboardChartsDto {
                weight_chart: weight_chart(rows),
                workout_chart: workout_chart(rows),
                score_trend: score_trend(rows),
            },
            goals: merged_goals(rows),
            insights: insights(rows),
            achievements: achievements(rows),
        }
    }

    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            overview: self.overview,
            charts: self.charts,
            goals: self.goals,
            insights: self.insights,
            achievements: self.achievements,
        }
    }
}

fn overview(rows: &[Analytics]) -> DashboardOverviewDto {
    let average_score = if rows.is_empty() {
        0.0
    } else {
        round1(rows.iter().map(|r| r.score.unwrap_or(0.0)).sum::<f64>() / rows.len() as f64)
    };

    let weight_trend = rows
        .iter()
        .find(|r| r.analytics_type == AnalyticsType::WeightTracking)
        .and_then(|r| r.metrics.get("trend").and_then(Value::as_str))
        .unwrap_or("no_data")
        .to_string();

    let workouts_completed = rows
        .iter()
        .filter(|r| r.analytics_type == AnalyticsType::WorkoutSummary)
        .filter_map(|r| r.metrics.get("workouts_count").and_then(Value::as_i64))
        .sum();

    DashboardOverviewDto {
        total_analytics: rows.len() as u64,
        average_score,
        weight_trend,
        workouts_completed,
    }
}

fn weight_chart(rows: &[Analytics]) -> Vec<WeightPointDto> {
    let mut points: Vec<_> = rows
        .iter()
        .filter(|r| r.analytics_type == AnalyticsType::WeightTracking)
        .map(|r| WeightPointDto {
            date: r.period_start,
            weight: r.metric("average_weight"),
            change: r.metric("weight_change"),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

fn workout_chart(rows: &[Analytics]) -> Vec<WorkoutPointDto> {
    let mut points: Vec<_> = rows
        .iter()
        .filter(|r| r.analytics_type == AnalyticsType::WorkoutSummary)
        .map(|r| WorkoutPointDto {
            date: r.period_start,
            workouts: r.metric("workouts_count").unwrap_or(0.0),
            duration: r.metric("total_duration").unwrap_or(0.0),
            calories: r.metric("calories_burned").unwrap_or(0.0),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

fn score_trend(rows: &[Analytics]) -> Vec<ScorePointDto> {
    let mut points: Vec<_> = rows
        .iter()
        .map(|r| ScorePointDto {
            date: r.period_start,
            score: r.score.unwrap_or(0.0),
            analytics_type: r.analytics_type,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Union of every row's `goals_progress`; the first row holding a key wins.
fn merged_goals(rows: &[Analytics]) -> Map<String, Value> {
    let mut goals = Map::new();
    for row in rows {
        for (key, value) in object_or_empty(row.goals_progress.as_ref()) {
            goals.entry(key).or_insert(value);
        }
    }
    goals
}

fn insights(rows: &[Analytics]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.insight("summary").and_then(Value::as_str))
        .take(MAX_INSIGHTS)
        .map(str::to_string)
        .collect()
}

fn achievements(rows: &[Analytics]) -> Vec<String> {
    let mut achievements: Vec<String> = Vec::new();
    let all = rows
        .iter()
        .filter_map(|r| r.insight("achievements").and_then(Value::as_array))
        .flatten()
        .filter_map(Value::as_str);

    for achievement in all {
        if achievements.len() == MAX_ACHIEVEMENTS {
            break;
        }
        if !achievements.iter().any(|a| a == achievement) {
            achievements.push(achievement.to_string());
        }
    }
    achievements
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsFilter {
    pub analytics_type: Option<AnalyticsType>,
    pub period_type: Option<PeriodType>,
    /// Inclusive bounds on `period_start`.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct CreateAnalyticsParams {
    pub user_id: Uuid,
    pub analytics_type: AnalyticsType,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub metrics: Value,
    pub insights: Option<Value>,
    pub score: Option<f64>,
    pub goals_progress: Option<Value>,
    pub comparisons: Option<Value>,
}

impl CreateAnalyticsParams {
    pub fn from_dto(user_id: Uuid, dto: CreateAnalyticsDto) -> Self {
        Self {
            user_id,
            analytics_type: dto.analytics_type,
            period_type: dto.period_type,
            period_start: dto.period_start,
            period_end: dto.period_end,
            metrics: dto.metrics,
            insights: dto.insights,
            score: dto.score,
            goals_progress: dto.goals_progress,
            comparisons: dto.comparisons,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAnalyticsParams {
    pub analytics_type: Option<AnalyticsType>,
    pub period_type: Option<PeriodType>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub metrics: Option<Value>,
    pub insights: Option<Value>,
    pub score: Option<f64>,
    pub goals_progress: Option<Value>,
    pub comparisons: Option<Value>,
}

impl UpdateAnalyticsParams {
    pub fn from_dto(dto: UpdateAnalyticsDto) -> Self {
        Self {
            analytics_type: dto.analytics_type,
            period_type: dto.period_type,
            period_start: dto.period_start,
            period_end: dto.period_end,
            metrics: dto.metrics,
            insights: dto.insights,
            score: dto.score,
            goals_progress: dto.goals_progress,
            comparisons: dto.comparisons,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
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

impl DashboardSettings {
    pub fn from_entity(entity: entity::dashboard_settings::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            widget_preferences: entity.widget_preferences,
            chart_preferences: entity.chart_preferences,
            notification_preferences: entity.notification_preferences,
            theme: entity.theme,
            units_preference: entity.units_preference,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> DashboardSettingsDto {
        DashboardSettingsDto {
            id: self.id,
            user_id: self.user_id,
            widget_preferences: self.widget_preferences,
            chart_preferences: self.chart_preferences,
            notification_preferences: self.notification_preferences,
            theme: self.theme,
            units_preference: self.units_preference,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Complete settings to store for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettingsParams {
    pub widget_preferences: Value,
    pub chart_preferences: Value,
    pub notification_preferences: Value,
    pub theme: Theme,
    pub units_preference: UnitsPreference,
}

impl Default for DashboardSettingsParams {
    fn default() -> Self {
        Self {
            widget_preferences: json!({
                "weight_chart": { "enabled": true, "position": 1 },
                "workout_summary": { "enabled": true, "position": 2 },
                "goals_progress": { "enabled": true, "position": 3 },
                "recent_activities": { "enabled": true, "position": 4 },
            }),
            chart_preferences: json!({
                "weight_chart_type": "line",
                "workout_chart_type": "bar",
                "show_trends": true,
                "show_goals": true,
            }),
            notification_preferences: json!({
                "weekly_summary": true,
                "goal_achievements": true,
                "milestone_alerts": true,
                "trend_insights": true,
            }),
            theme: Theme::Light,
            units_preference: UnitsPreference::Metric,
        }
    }
}

impl DashboardSettingsParams {
    /// Overlays the provided fields of `dto` onto `self`.
    pub fn apply(mut self, dto: SaveDashboardSettingsDto) -> Self {
        if let Some(widgets) = dto.widget_preferences {
            self.widget_preferences = Value::Object(widgets);
        }
        if let Some(charts) = dto.chart_preferences {
            self.chart_preferences = Value::Object(charts);
        }
        if let Some(notifications) = dto.notification_preferences {
            self.notification_preferences = Value::Object(notifications);
        }
        if let Some(theme) = dto.theme {
            self.theme = theme;
        }
        if let Some(units) = dto.units_preference {
            self.units_preference = units;
        }
        self
    }

    pub fn from_settings(settings: DashboardSettings) -> Self {
        Self {
            widget_preferences: settings.widget_preferences,
            chart_preferences: settings.chart_preferences,
            notification_preferences: settings.notification_preferences,
            theme: settings.theme,
            units_preference: settings.units_preference,
        }
    }
}

pub fn paginated_analytics_dto(page: Page<Analytics>) -> PaginatedAnalyticsDto {
    let page = page.map(Analytics::into_dto);

    PaginatedAnalyticsDto {
        analytics: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        analytics_type: AnalyticsType,
        day: u32,
        score: Option<f64>,
        metrics: Value,
        insights: Option<Value>,
        goals_progress: Option<Value>,
    ) -> Analytics {
        let date = NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
        Analytics {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            analytics_type,
            period_type: PeriodType::Weekly,
            period_start: date,
            period_end: date,
            metrics,
            insights,
            score,
            goals_progress,
            comparisons: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn window_start_per_period() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(window_start(today, PeriodType::Daily), date(2025, 3, 30));
        assert_eq!(window_start(today, PeriodType::Weekly), date(2025, 3, 24));
        assert_eq!(window_start(today, PeriodType::Monthly), date(2025, 2, 28));
        assert_eq!(window_start(today, PeriodType::Yearly), date(2024, 3, 31));
    }

    /// Expected: empty window yields zeroed overview and "no_data" weight trend
    #[test]
    fn empty_dashboard() {
        let dashboard = Dashboard::from_analytics(&[]);

        assert_eq!(dashboard.overview.total_analytics, 0);
        assert_eq!(dashboard.overview.average_score, 0.0);
        assert_eq!(dashboard.overview.weight_trend, "no_data");
        assert!(dashboard.goals.is_empty());
        assert!(dashboard.charts.score_trend.is_empty());
    }

    /// Expected: overview uses the latest weight row, charts ascend by date,
    /// goals keep the most recent value per key
    #[test]
    fn dashboard_reduces_rows() {
        let rows = vec![
            row(
                AnalyticsType::WeightTracking,
                20,
                Some(80.0),
                json!({ "trend": "decreasing", "average_weight": 71.5, "weight_change": -0.5 }),
                Some(json!({ "summary": "Down half a kilo", "achievements": ["streak", "loss"] })),
                Some(json!({ "weight_loss": { "percentage": 40 } })),
            ),
            row(
                AnalyticsType::WorkoutSummary,
                15,
                None,
                json!({ "workouts_count": 4, "total_duration": 180, "calories_burned": 1200 }),
                Some(json!({ "achievements": ["streak", "first_5k"] })),
                Some(json!({ "weight_loss": { "percentage": 10 }, "sleep": { "percentage": 90 } })),
            ),
            row(
                AnalyticsType::WeightTracking,
                10,
                Some(65.0),
                json!({ "trend": "increasing", "average_weight": 72.0 }),
                Some(json!({ "summary": "Up a little" })),
                None,
            ),
        ];

        let dashboard = Dashboard::from_analytics(&rows);

        assert_eq!(dashboard.overview.total_analytics, 3);
        assert_eq!(dashboard.overview.average_score, 48.3);
        assert_eq!(dashboard.overview.weight_trend, "decreasing");
        assert_eq!(dashboard.overview.workouts_completed, 4);

        let weights: Vec<_> = dashboard.charts.weight_chart.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![Some(72.0), Some(71.5)]);
        assert_eq!(dashboard.charts.workout_chart[0].calories, 1200.0);
        assert_eq!(dashboard.charts.score_trend.first().map(|p| p.score), Some(65.0));

        assert_eq!(dashboard.goals["weight_loss"], json!({ "percentage": 40 }));
        assert_eq!(dashboard.goals["sleep"], json!({ "percentage": 90 }));
        assert_eq!(dashboard.insights, vec!["Down half a kilo", "Up a little"]);
        assert_eq!(dashboard.achievements, vec!["streak", "loss", "first_5k"]);
    }

    #[test]
    fn settings_overlay_keeps_unspecified_fields() {
        let params = DashboardSettingsParams::default().apply(SaveDashboardSettingsDto {
            theme: Some(Theme::Dark),
            ..Default::default()
        });

        assert_eq!(params.theme, Theme::Dark);
        assert_eq!(params.units_preference, UnitsPreference::Metric);
        assert_eq!(params.chart_preferences["weight_chart_type"], "line");
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::health_log::{
        CreateHealthLogDto, DateRangeDto, HealthLogDto, HealthStatsDto, PaginatedHealthLogsDto,
        UpdateHealthLogDto,
    },
    server::util::{pagination::Page, round2},
};

#[derive(Debug, Clone, PartialEq)]
pub struct HealthLog {
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

impl HealthLog {
    pub fn from_entity(entity: entity::health_log::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            calories: entity.calories,
            steps: entity.steps,
            hydration_ml: entity.hydration_ml,
            sleep_hours: entity.sleep_hours,
            vitamin_summary: entity.vitamin_summary,
            additional_metrics: entity.additional_metrics,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> HealthLogDto {
        HealthLogDto {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            calories: self.calories,
            steps: self.steps,
            hydration_ml: self.hydration_ml,
            sleep_hours: self.sleep_hours,
            vitamin_summary: self.vitamin_summary,
            additional_metrics: self.additional_metrics,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Averages over a user's logs. Each average only counts logs that recorded the metric.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStats {
    pub avg_calories: f64,
    pub avg_steps: f64,
    pub avg_hydration_ml: f64,
    pub avg_sleep_hours: f64,
    pub total_entries: u64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl HealthStats {
    /// # Arguments
    /// - `logs` - Logs inside the requested window
    /// - `start`, `end` - Requested bounds; missing bounds fall back to the logged dates
    pub fn from_logs(logs: &[HealthLog], start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            avg_calories: average(logs.iter().filter_map(|l| l.calories.map(f64::from))),
            avg_steps: average(logs.iter().filter_map(|l| l.steps.map(f64::from))),
            avg_hydration_ml: average(logs.iter().filter_map(|l| l.hydration_ml.map(f64::from))),
            avg_sleep_hours: average(logs.iter().filter_map(|l| l.sleep_hours)),
            total_entries: logs.len() as u64,
            start: start.or_else(|| logs.iter().map(|l| l.date).min()),
            end: end.or_else(|| logs.iter().map(|l| l.date).max()),
        }
    }

    pub fn into_dto(self) -> HealthStatsDto {
        HealthStatsDto {
            avg_calories: self.avg_calories,
            avg_steps: self.avg_steps,
            avg_hydration_ml: self.avg_hydration_ml,
            avg_sleep_hours: self.avg_sleep_hours,
            total_entries: self.total_entries,
            date_range: DateRangeDto {
                start: self.start,
                end: self.end,
            },
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}

#[derive(Debug, Clone)]
pub struct CreateHealthLogParams {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub calories: Option<i32>,
    pub steps: Option<i32>,
    pub hydration_ml: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Value>,
}

impl CreateHealthLogParams {
    pub fn from_dto(user_id: Uuid, dto: CreateHealthLogDto) -> Self {
        Self {
            user_id,
            date: dto.date,
            calories: dto.calories,
            steps: dto.steps,
            hydration_ml: dto.hydration_ml,
            sleep_hours: dto.sleep_hours,
            vitamin_summary: dto.vitamin_summary,
            additional_metrics: dto.additional_metrics,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateHealthLogParams {
    pub date: Option<NaiveDate>,
    pub calories: Option<i32>,
    pub steps: Option<i32>,
    pub hydration_ml: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub vitamin_summary: Option<String>,
    pub additional_metrics: Option<Value>,
}

impl UpdateHealthLogParams {
    pub fn from_dto(dto: UpdateHealthLogDto) -> Self {
        Self {
            date: dto.date,
            calories: dto.calories,
            steps: dto.steps,
            hydration_ml: dto.hydration_ml,
            sleep_hours: dto.sleep_hours,
            vitamin_summary: dto.vitamin_summary,
            additional_metrics: dto.additional_metrics,
        }
    }
}

pub fn paginated_health_logs_dto(page: Page<HealthLog>) -> PaginatedHealthLogsDto {
    let page = page.map(HealthLog::into_dto);

    PaginatedHealthLogsDto {
        health_logs: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(day: u32, calories: Option<i32>, sleep_hours: Option<f64>) -> HealthLog {
        HealthLog {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            calories,
            steps: None,
            hydration_ml: None,
            sleep_hours,
            vitamin_summary: None,
            additional_metrics: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Expected: nulls are skipped, empty metrics average to 0 and the range spans the logs
    #[test]
    fn stats_average_only_recorded_values() {
        let logs = vec![
            log(3, Some(2000), Some(7.5)),
            log(1, None, Some(8.0)),
            log(2, Some(2500), None),
        ];

        let stats = HealthStats::from_logs(&logs, None, None);

        assert_eq!(stats.avg_calories, 2250.0);
        assert_eq!(stats.avg_sleep_hours, 7.75);
        assert_eq!(stats.avg_steps, 0.0);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.start, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(stats.end, NaiveDate::from_ymd_opt(2025, 7, 3));
    }
}

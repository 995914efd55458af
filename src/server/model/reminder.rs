use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use entity::reminder::{ReminderFrequency, ReminderStatus, ReminderType};
use sea_orm::ActiveEnum;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::reminder::{
        CreateReminderDto, PaginatedRemindersDto, ReminderDto, ReminderStatsDto,
        UpdateReminderDto,
    },
    server::util::{json::object_or_empty, pagination::Page},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: ReminderType,
    pub frequency: ReminderFrequency,
    pub time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: ReminderStatus,
    pub is_notification_enabled: bool,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    pub fn from_entity(entity: entity::reminder::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            reminder_type: entity.reminder_type,
            frequency: entity.frequency,
            time: entity.time,
            start_date: entity.start_date,
            end_date: entity.end_date,
            custom_schedule: entity.custom_schedule,
            status: entity.status,
            is_notification_enabled: entity.is_notification_enabled,
            metadata: entity.metadata,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ReminderDto {
        ReminderDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            reminder_type: self.reminder_type,
            frequency: self.frequency,
            time: self.time,
            start_date: self.start_date,
            end_date: self.end_date,
            custom_schedule: self.custom_schedule,
            status: self.status,
            is_notification_enabled: self.is_notification_enabled,
            metadata: self.metadata,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Whether an end date, if both are present, falls strictly after the start date.
pub fn is_valid_schedule(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => end > start,
        _ => true,
    }
}

/// Metadata after snoozing: `snoozed_until` moves to `now + minutes` and
/// `snooze_count` goes up by one. Other keys are kept.
pub fn snoozed_metadata(metadata: Option<&Value>, now: DateTime<Utc>, minutes: i64) -> Value {
    let mut map = object_or_empty(metadata);

    let until = now + Duration::minutes(minutes);
    let count = map
        .get("snooze_count")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    map.insert(
        "snoozed_until".to_string(),
        Value::String(until.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    map.insert("snooze_count".to_string(), Value::from(count + 1));

    Value::Object(map)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderStats {
    pub total_reminders: u64,
    pub active_reminders: u64,
    pub completed_reminders: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_frequency: BTreeMap<String, u64>,
}

impl ReminderStats {
    pub fn from_reminders(reminders: &[Reminder]) -> Self {
        let mut stats = Self {
            total_reminders: reminders.len() as u64,
            ..Default::default()
        };

        for reminder in reminders {
            match reminder.status {
                ReminderStatus::Active => stats.active_reminders += 1,
                ReminderStatus::Completed => stats.completed_reminders += 1,
                _ => {}
            }
            *stats
                .by_type
                .entry(reminder.reminder_type.to_value())
                .or_insert(0) += 1;
            *stats
                .by_frequency
                .entry(reminder.frequency.to_value())
                .or_insert(0) += 1;
        }

        stats
    }

    pub fn into_dto(self) -> ReminderStatsDto {
        ReminderStatsDto {
            total_reminders: self.total_reminders,
            active_reminders: self.active_reminders,
            completed_reminders: self.completed_reminders,
            by_type: self.by_type,
            by_frequency: self.by_frequency,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReminderFilter {
    pub status: Option<ReminderStatus>,
    pub reminder_type: Option<ReminderType>,
}

#[derive(Debug, Clone)]
pub struct CreateReminderParams {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: ReminderType,
    pub frequency: ReminderFrequency,
    pub time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: ReminderStatus,
    pub is_notification_enabled: bool,
    pub metadata: Option<Value>,
}

impl CreateReminderParams {
    pub fn from_dto(user_id: Uuid, dto: CreateReminderDto) -> Self {
        Self {
            user_id,
            title: dto.title,
            description: dto.description,
            reminder_type: dto.reminder_type,
            frequency: dto.frequency,
            time: dto.time,
            start_date: dto.start_date,
            end_date: dto.end_date,
            custom_schedule: dto.custom_schedule,
            status: dto.status.unwrap_or(ReminderStatus::Active),
            is_notification_enabled: dto.is_notification_enabled.unwrap_or(true),
            metadata: dto.metadata,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReminderParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_type: Option<ReminderType>,
    pub frequency: Option<ReminderFrequency>,
    pub time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub custom_schedule: Option<Value>,
    pub status: Option<ReminderStatus>,
    pub is_notification_enabled: Option<bool>,
    pub metadata: Option<Value>,
}

impl UpdateReminderParams {
    pub fn from_dto(dto: UpdateReminderDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            reminder_type: dto.reminder_type,
            frequency: dto.frequency,
            time: dto.time,
            start_date: dto.start_date,
            end_date: dto.end_date,
            custom_schedule: dto.custom_schedule,
            status: dto.status,
            is_notification_enabled: dto.is_notification_enabled,
            metadata: dto.metadata,
        }
    }
}

pub fn paginated_reminders_dto(page: Page<Reminder>) -> PaginatedRemindersDto {
    let page = page.map(Reminder::into_dto);

    PaginatedRemindersDto {
        reminders: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn schedule_requires_end_after_start() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 7, day);

        assert!(is_valid_schedule(d(1), d(2)));
        assert!(!is_valid_schedule(d(2), d(2)));
        assert!(!is_valid_schedule(d(3), d(2)));
        assert!(is_valid_schedule(None, d(2)));
    }

    /// Expected: `snooze_count` increments and unrelated keys survive
    #[test]
    fn snooze_keeps_existing_metadata() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap();
        let metadata = json!({"dose": "10mg", "snooze_count": 2});

        let updated = snoozed_metadata(Some(&metadata), now, 15);

        assert_eq!(updated["dose"], "10mg");
        assert_eq!(updated["snooze_count"], 3);
        assert_eq!(updated["snoozed_until"], "2025-07-01T08:15:00.000Z");
    }

    #[test]
    fn first_snooze_starts_count_at_one() {
        let updated = snoozed_metadata(None, Utc::now(), 5);

        assert_eq!(updated["snooze_count"], 1);
    }
}

//! In-app notifications and per-channel delivery preferences.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use entity::{
    notification::{NotificationPriority, NotificationType},
    notification_preference::DeliveryChannel,
};
use sea_orm::ActiveEnum;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    model::notification::{
        AchievementNotificationDto, BulkNotificationDto, CreateNotificationDto,
        NotificationDto, NotificationStatsDto, PaginatedNotificationsDto, PreferenceDto,
        SocialNotificationDto, UpdateNotificationDto, WorkoutReminderDto,
    },
    server::{model::user::UserSummary, util::pagination::Page},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub triggered_by_user_id: Option<Uuid>,
    pub triggered_by_user: Option<UserSummary>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub data: Option<Value>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(
        entity: entity::notification::Model,
        triggered_by_user: Option<UserSummary>,
    ) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            triggered_by_user_id: entity.triggered_by_user_id,
            triggered_by_user,
            title: entity.title,
            message: entity.message,
            notification_type: entity.notification_type,
            priority: entity.priority,
            data: entity.data,
            action_url: entity.action_url,
            action_text: entity.action_text,
            image_url: entity.image_url,
            category: entity.category,
            read_at: entity.read_at,
            delivered_at: entity.delivered_at,
            clicked_at: entity.clicked_at,
            scheduled_for: entity.scheduled_for,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            user_id: self.user_id,
            triggered_by_user_id: self.triggered_by_user_id,
            triggered_by_user: self.triggered_by_user.map(UserSummary::into_dto),
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
            priority: self.priority,
            data: self.data,
            action_url: self.action_url,
            action_text: self.action_text,
            image_url: self.image_url,
            category: self.category,
            read_at: self.read_at,
            delivered_at: self.delivered_at,
            clicked_at: self.clicked_at,
            scheduled_for: self.scheduled_for,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Read and click timestamps after applying an update request at `now`.
///
/// Clicking implies reading. Timestamps that are already set are kept.
pub fn read_state(
    read_at: Option<DateTime<Utc>>,
    clicked_at: Option<DateTime<Utc>>,
    update: &UpdateNotificationDto,
    now: DateTime<Utc>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let clicked = update.mark_as_clicked.unwrap_or(false);
    let read = update.mark_as_read.unwrap_or(false) || clicked;

    let read_at = if read { read_at.or(Some(now)) } else { read_at };
    let clicked_at = if clicked { clicked_at.or(Some(now)) } else { clicked_at };

    (read_at, clicked_at)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationStats {
    pub total_notifications: u64,
    pub unread_notifications: u64,
    pub notifications_by_type: BTreeMap<String, u64>,
    pub recent_activity: bool,
}

impl NotificationStats {
    /// # Arguments
    /// - `notifications` - A user's active notifications
    /// - `now` - Reference time for the 24 hour activity window
    pub fn from_notifications(notifications: &[Notification], now: DateTime<Utc>) -> Self {
        let since = now - Duration::hours(24);
        let mut stats = Self {
            total_notifications: notifications.len() as u64,
            ..Default::default()
        };

        for notification in notifications {
            if notification.read_at.is_none() {
                stats.unread_notifications += 1;
            }
            if notification.created_at >= since {
                stats.recent_activity = true;
            }
            *stats
                .notifications_by_type
                .entry(notification.notification_type.to_value())
                .or_insert(0) += 1;
        }

        stats
    }

    pub fn into_dto(self) -> NotificationStatsDto {
        NotificationStatsDto {
            total_notifications: self.total_notifications,
            unread_notifications: self.unread_notifications,
            notifications_by_type: self.notifications_by_type,
            recent_activity: self.recent_activity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub unread_only: bool,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateNotificationParams {
    pub user_id: Uuid,
    pub triggered_by_user_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub data: Option<Value>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl CreateNotificationParams {
    pub fn from_dto(dto: CreateNotificationDto) -> Self {
        Self {
            user_id: dto.user_id,
            triggered_by_user_id: dto.triggered_by_user_id,
            title: dto.title,
            message: dto.message,
            notification_type: dto.notification_type,
            priority: dto.priority.unwrap_or(NotificationPriority::Medium),
            data: dto.data,
            action_url: dto.action_url,
            action_text: dto.action_text,
            image_url: dto.image_url,
            category: dto.category,
            scheduled_for: dto.scheduled_for,
        }
    }

    /// One notification per recipient, delivered immediately.
    pub fn for_recipients(dto: BulkNotificationDto) -> Vec<Self> {
        dto.user_ids
            .iter()
            .map(|&user_id| Self {
                user_id,
                triggered_by_user_id: dto.triggered_by_user_id,
                title: dto.title.clone(),
                message: dto.message.clone(),
                notification_type: dto.notification_type,
                priority: dto.priority.unwrap_or(NotificationPriority::Medium),
                data: dto.data.clone(),
                action_url: dto.action_url.clone(),
                action_text: None,
                image_url: None,
                category: dto.category.clone(),
                scheduled_for: None,
            })
            .collect()
    }

    pub fn workout_reminder(user_id: Uuid, dto: WorkoutReminderDto) -> Self {
        let action_url = match &dto.workout_id {
            Some(id) => format!("/app/workouts/start?id={}", id),
            None => "/app/workouts".to_string(),
        };

        Self {
            user_id,
            triggered_by_user_id: None,
            title: "Workout Reminder".to_string(),
            message: format!("Time for your {} workout!", dto.workout_type),
            notification_type: NotificationType::Reminder,
            priority: NotificationPriority::Medium,
            data: Some(json!({ "type": dto.workout_type, "workout_id": dto.workout_id })),
            action_url: Some(action_url),
            action_text: Some("Start Workout".to_string()),
            image_url: None,
            category: Some("workouts".to_string()),
            scheduled_for: None,
        }
    }

    pub fn achievement(user_id: Uuid, dto: AchievementNotificationDto) -> Self {
        Self {
            user_id,
            triggered_by_user_id: None,
            title: "Achievement Unlocked!".to_string(),
            message: format!("Congratulations! You've earned: {}", dto.title),
            notification_type: NotificationType::Achievement,
            priority: NotificationPriority::High,
            action_url: Some(format!("/app/achievements/{}", dto.id)),
            data: Some(json!({
                "id": dto.id,
                "title": dto.title,
                "description": dto.description,
            })),
            action_text: Some("View Achievement".to_string()),
            image_url: None,
            category: Some("achievements".to_string()),
            scheduled_for: None,
        }
    }

    pub fn social(user_id: Uuid, triggered_by_user_id: Uuid, dto: SocialNotificationDto) -> Self {
        Self {
            user_id,
            triggered_by_user_id: Some(triggered_by_user_id),
            title: "Social Activity".to_string(),
            data: Some(json!({
                "message": dto.message,
                "action_url": dto.action_url,
                "action_text": dto.action_text,
            })),
            message: dto.message,
            notification_type: NotificationType::SocialActivity,
            priority: NotificationPriority::Low,
            action_url: dto.action_url,
            action_text: dto.action_text,
            image_url: None,
            category: Some("social".to_string()),
            scheduled_for: None,
        }
    }

    /// Delivery time for a new notification. Scheduled ones wait for their slot.
    pub fn delivered_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.scheduled_for {
            Some(_) => None,
            None => Some(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub delivery_channel: DeliveryChannel,
    pub is_enabled: bool,
    pub settings: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Preference {
    pub fn from_entity(entity: entity::notification_preference::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            notification_type: entity.notification_type,
            delivery_channel: entity.delivery_channel,
            is_enabled: entity.is_enabled,
            settings: entity.settings,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PreferenceDto {
        PreferenceDto {
            id: self.id,
            user_id: self.user_id,
            notification_type: self.notification_type,
            delivery_channel: self.delivery_channel,
            is_enabled: self.is_enabled,
            settings: self.settings,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn paginated_notifications_dto(
    page: Page<Notification>,
    unread_count: u64,
) -> PaginatedNotificationsDto {
    let page = page.map(Notification::into_dto);

    PaginatedNotificationsDto {
        notifications: page.items,
        total: page.total,
        unread_count,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn notification(
        notification_type: NotificationType,
        read: bool,
        created_at: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            triggered_by_user_id: None,
            triggered_by_user: None,
            title: "Title".to_string(),
            message: "Message".to_string(),
            notification_type,
            priority: NotificationPriority::Medium,
            data: None,
            action_url: None,
            action_text: None,
            image_url: None,
            category: None,
            read_at: read.then_some(created_at),
            delivered_at: Some(created_at),
            clicked_at: None,
            scheduled_for: None,
            is_active: true,
            created_at,
            updated_at: created_at,
        }
    }

    /// Expected: clicking stamps both read_at and clicked_at
    #[test]
    fn click_marks_as_read() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        let update = UpdateNotificationDto {
            mark_as_clicked: Some(true),
            ..Default::default()
        };

        assert_eq!(read_state(None, None, &update, now), (Some(now), Some(now)));
    }

    /// Expected: an earlier read time survives a later mark_as_read
    #[test]
    fn read_keeps_first_timestamp() {
        let earlier = Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        let update = UpdateNotificationDto {
            mark_as_read: Some(true),
            ..Default::default()
        };

        assert_eq!(read_state(Some(earlier), None, &update, now), (Some(earlier), None));
    }

    /// Expected: only notifications from the last day count as recent activity
    #[test]
    fn stats_count_types_and_recent_activity() {
        let now = Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap();
        let old = now - Duration::days(3);

        let stats = NotificationStats::from_notifications(
            &[
                notification(NotificationType::Reminder, true, old),
                notification(NotificationType::Reminder, false, old),
                notification(NotificationType::Achievement, false, old),
            ],
            now,
        );

        assert_eq!(stats.total_notifications, 3);
        assert_eq!(stats.unread_notifications, 2);
        assert_eq!(stats.notifications_by_type.get("reminder"), Some(&2));
        assert_eq!(stats.notifications_by_type.get("achievement"), Some(&1));
        assert!(!stats.recent_activity);

        let recent = NotificationStats::from_notifications(
            &[notification(NotificationType::PostLike, false, now - Duration::hours(2))],
            now,
        );
        assert!(recent.recent_activity);
    }

    #[test]
    fn helper_creators_set_type_priority_and_category() {
        let user_id = Uuid::new_v4();
        let workout = CreateNotificationParams::workout_reminder(
            user_id,
            WorkoutReminderDto {
                workout_type: "cardio".to_string(),
                workout_id: Some("w1".to_string()),
            },
        );

        assert_eq!(workout.notification_type, NotificationType::Reminder);
        assert_eq!(workout.priority, NotificationPriority::Medium);
        assert_eq!(workout.category.as_deref(), Some("workouts"));
        assert_eq!(workout.action_url.as_deref(), Some("/app/workouts/start?id=w1"));

        let social = CreateNotificationParams::social(
            user_id,
            Uuid::nil(),
            SocialNotificationDto {
                message: "Someone liked your post".to_string(),
                action_url: None,
                action_text: None,
            },
        );

        assert_eq!(social.priority, NotificationPriority::Low);
        assert_eq!(social.triggered_by_user_id, Some(Uuid::nil()));
        assert_eq!(social.category.as_deref(), Some("social"));
    }
}

use chrono::{Duration, Utc};
use entity::{notification::NotificationType, notification_preference::DeliveryChannel};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::{
    model::notification::{
        AchievementNotificationDto, SocialNotificationDto, UpdatePreferenceDto,
        UpsertPreferenceDto,
    },
    server::{
        error::AppError,
        model::notification::{CreateNotificationParams, NotificationFilter},
        service::notification::NotificationService,
        util::pagination::PageRequest,
    },
};

mod create;
mod preferences;
mod read_state;

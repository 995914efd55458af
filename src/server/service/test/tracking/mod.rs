use chrono::{Duration, NaiveDate, Utc};
use entity::{
    challenge::{ChallengeDifficulty, ChallengeStatus, ChallengeType},
    reminder::{ReminderFrequency, ReminderStatus, ReminderType},
};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::server::{
    error::AppError,
    model::{
        challenge::{CreateChallengeParams, RecordProgressParams},
        health_log::CreateHealthLogParams,
        reminder::CreateReminderParams,
    },
    service::{
        challenge::ChallengeService, health_log::HealthLogService, reminder::ReminderService,
    },
};

mod challenges;
mod health_logs;
mod reminders;

use chrono::{Duration, Utc};
use entity::analytics::AnalyticsType;
use sea_orm::DbErr;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::analytics::AnalyticsRepository;

mod find_in_window;

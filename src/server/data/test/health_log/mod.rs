use chrono::NaiveDate;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{data::health_log::HealthLogRepository, util::pagination::PageRequest};

mod find;

use chrono::{Duration, Utc};
use crate::server::{
    data::notification::NotificationRepository,
    model::notification::NotificationFilter,
    util::pagination::PageRequest,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod deliver_due;
mod find_by_user;
mod mark_all_read;

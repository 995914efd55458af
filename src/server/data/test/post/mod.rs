use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use crate::server::{
    data::post::PostRepository,
    model::post::PostFilter,
    util::pagination::PageRequest,
};
use entity::post::PostVisibility;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod find_many;
mod likes;

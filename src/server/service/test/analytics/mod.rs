use chrono::{Duration, Utc};
use entity::{
    analytics::{AnalyticsType, PeriodType},
    dashboard_settings::{Theme, UnitsPreference},
};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::{
    model::analytics::SaveDashboardSettingsDto,
    server::{
        error::AppError, model::analytics::CreateAnalyticsParams,
        service::analytics::AnalyticsService,
    },
};

mod dashboard;
mod settings;

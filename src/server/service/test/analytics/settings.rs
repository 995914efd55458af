use super::*;

/// Tests that reading settings creates the defaults once.
///
/// Expected: Ok with the same settings row on both reads
#[tokio::test]
async fn creates_default_settings_on_first_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let service = AnalyticsService::new(db);

    let first = service.settings(user.id, user.id).await?;
    let second = service.settings(user.id, user.id).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(first.theme, Theme::Light);
    assert_eq!(first.units_preference, UnitsPreference::Metric);
    assert_eq!(first.chart_preferences["weight_chart_type"], "line");

    Ok(())
}

/// Tests that saving settings overlays only the provided fields.
///
/// Expected: Ok with the dark theme and the default chart preferences kept
#[tokio::test]
async fn save_overlays_provided_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let service = AnalyticsService::new(db);
    let existing = service.settings(user.id, user.id).await?;

    let saved = service
        .save_settings(
            user.id,
            SaveDashboardSettingsDto {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(saved.id, existing.id);
    assert_eq!(saved.theme, Theme::Dark);
    assert_eq!(saved.chart_preferences, existing.chart_preferences);

    Ok(())
}

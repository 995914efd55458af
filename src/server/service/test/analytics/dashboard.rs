use super::*;

/// Tests that the weekly dashboard only summarizes the last seven days.
///
/// Expected: Ok with 2 rows counted, 5 workouts and the latest weight trend
#[tokio::test]
async fn weekly_dashboard_uses_recent_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WeightTracking,
        1,
        json!({ "trend": "decreasing", "average_weight": 71.5 }),
        Some(80.0),
        None,
    )
    .await?;
    factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WorkoutSummary,
        3,
        json!({ "workouts_count": 5 }),
        Some(60.0),
        None,
    )
    .await?;
    factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WorkoutSummary,
        20,
        json!({ "workouts_count": 9 }),
        Some(10.0),
        None,
    )
    .await?;

    let dashboard = AnalyticsService::new(db)
        .dashboard(user.id, user.id, PeriodType::Weekly)
        .await?;

    assert_eq!(dashboard.overview.total_analytics, 2);
    assert_eq!(dashboard.overview.average_score, 70.0);
    assert_eq!(dashboard.overview.workouts_completed, 5);
    assert_eq!(dashboard.overview.weight_trend, "decreasing");
    assert_eq!(dashboard.charts.weight_chart.len(), 1);

    Ok(())
}

/// Tests viewing another user's dashboard.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_foreign_dashboard() -> Result<(), AppError> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let result = AnalyticsService::new(db)
        .dashboard(other.id, owner.id, PeriodType::Monthly)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests creating a row whose period ends before it starts.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_inverted_period() -> Result<(), AppError> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let today = Utc::now().date_naive();

    let result = AnalyticsService::new(db)
        .create(CreateAnalyticsParams {
            user_id: user.id,
            analytics_type: AnalyticsType::SleepPattern,
            period_type: PeriodType::Weekly,
            period_start: today,
            period_end: today - Duration::days(1),
            metrics: json!({ "avg_hours": 7.2 }),
            insights: None,
            score: None,
            goals_progress: None,
            comparisons: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

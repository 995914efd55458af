use super::*;

/// Tests selecting rows whose period starts inside the dashboard window.
///
/// Verifies that rows outside the window and rows of other users are skipped and
/// that the result is ordered latest period first.
///
/// Expected: Ok with the rows from 1 and 5 days ago
#[tokio::test]
async fn returns_rows_inside_window_latest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let metrics = json!({ "weight": 70.0 });
    let older = factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WeightTracking,
        5,
        metrics.clone(),
        None,
        None,
    )
    .await?;
    let recent = factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WeightTracking,
        1,
        metrics.clone(),
        None,
        None,
    )
    .await?;
    factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WeightTracking,
        30,
        metrics.clone(),
        None,
        None,
    )
    .await?;
    factory::create_analytics(
        db,
        other.id,
        AnalyticsType::WeightTracking,
        1,
        metrics,
        None,
        None,
    )
    .await?;
    let today = Utc::now().date_naive();

    let rows = AnalyticsRepository::new(db)
        .find_in_window(user.id, today - Duration::days(7), today)
        .await?;

    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![recent.id, older.id]);

    Ok(())
}

/// Tests that deleting reports whether a row existed.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn delete_reports_missing_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_analytics_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let row = factory::create_analytics(
        db,
        user.id,
        AnalyticsType::WorkoutSummary,
        0,
        json!({ "steps": 9000 }),
        Some(80.0),
        None,
    )
    .await?;
    let repo = AnalyticsRepository::new(db);

    assert!(repo.delete(row.id).await?);
    assert!(!repo.delete(row.id).await?);

    Ok(())
}

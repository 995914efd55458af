use super::*;

fn log_params(user_id: Uuid, date: NaiveDate, calories: Option<i32>) -> CreateHealthLogParams {
    CreateHealthLogParams {
        user_id,
        date,
        calories,
        steps: None,
        hydration_ml: None,
        sleep_hours: None,
        vitamin_summary: None,
        additional_metrics: None,
    }
}

/// Tests logging the same date twice.
///
/// Expected: Err(Conflict) on the second log
#[tokio::test]
async fn rejects_second_log_for_same_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let service = HealthLogService::new(db);
    service.create(log_params(user.id, date, Some(2100))).await?;

    let result = service.create(log_params(user.id, date, Some(1900))).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests averaging only the metrics that were logged.
///
/// Expected: Ok with avg_calories 2000 over 3 entries
#[tokio::test]
async fn stats_ignore_missing_values() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let day = |d| NaiveDate::from_ymd_opt(2025, 4, d).unwrap();
    factory::create_health_log(db, user.id, day(1), Some(1800), None).await?;
    factory::create_health_log(db, user.id, day(2), Some(2200), Some(9000)).await?;
    factory::create_health_log(db, user.id, day(3), None, None).await?;

    let stats = HealthLogService::new(db)
        .stats(user.id, user.id, None, None)
        .await?;

    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.avg_calories, 2000.0);
    assert_eq!(stats.avg_steps, 9000.0);
    assert_eq!(stats.start, Some(day(1)));
    assert_eq!(stats.end, Some(day(3)));

    Ok(())
}

/// Tests reading another user's logs.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_other_users_logs() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let log = factory::create_health_log(
        db,
        owner.id,
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        Some(2000),
        None,
    )
    .await?;

    let result = HealthLogService::new(db).get(other.id, log.id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

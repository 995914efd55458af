use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

/// Tests inclusive date bounds on the range query.
///
/// Expected: Ok with the logs of March 2nd to 4th, oldest first
#[tokio::test]
async fn range_is_inclusive_and_ascending() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    for d in 1..=5 {
        factory::create_health_log(db, user.id, day(d), Some(2000), Some(8000)).await?;
    }

    let logs = HealthLogRepository::new(db)
        .find_in_range(user.id, Some(day(2)), Some(day(4)))
        .await?;

    let dates: Vec<_> = logs.iter().map(|l| l.date).collect();
    assert_eq!(dates, vec![day(2), day(3), day(4)]);

    Ok(())
}

/// Tests that an open range returns everything for the user only.
///
/// Expected: Ok with the user's 2 logs
#[tokio::test]
async fn open_range_is_scoped_to_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_health_log(db, user.id, day(1), None, None).await?;
    factory::create_health_log(db, user.id, day(2), None, None).await?;
    factory::create_health_log(db, other.id, day(1), None, None).await?;

    let logs = HealthLogRepository::new(db)
        .find_in_range(user.id, None, None)
        .await?;

    assert_eq!(logs.len(), 2);

    Ok(())
}

/// Tests the paginated listing and the per-date lookup.
///
/// Expected: Ok with the most recent date first and the lookup hitting March 3rd
#[tokio::test]
async fn lists_latest_first_and_finds_by_date() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    for d in [1, 3, 2] {
        factory::create_health_log(db, user.id, day(d), Some(1800), None).await?;
    }
    let repo = HealthLogRepository::new(db);

    let page = repo.find_by_user(user.id, PageRequest::default()).await?;
    let found = repo.find_by_user_and_date(user.id, day(3)).await?;

    assert_eq!(page.items[0].date, day(3));
    assert_eq!(page.total, 3);
    assert_eq!(found.map(|l| l.date), Some(day(3)));
    assert!(repo.find_by_user_and_date(user.id, day(9)).await?.is_none());

    Ok(())
}

use super::*;

/// Tests delivering notifications whose scheduled time has passed.
///
/// Verifies that future notifications stay undelivered.
///
/// Expected: Ok(1) and only the due notification becomes visible
#[tokio::test]
async fn delivers_only_due_notifications() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let due = factory::notification::NotificationFactory::new(db, user.id)
        .scheduled_for(now - Duration::minutes(5))
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .scheduled_for(now + Duration::hours(2))
        .build()
        .await?;
    let repo = NotificationRepository::new(db);

    let delivered = repo.deliver_due(now).await?;

    assert_eq!(delivered, 1);
    let page = repo
        .find_by_user(user.id, &NotificationFilter::default(), PageRequest::default())
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, due.id);

    Ok(())
}

/// Tests that delivering twice does not touch already delivered rows.
///
/// Expected: Ok(0) on the second run
#[tokio::test]
async fn is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();
    factory::notification::NotificationFactory::new(db, user.id)
        .scheduled_for(now - Duration::minutes(1))
        .build()
        .await?;
    let repo = NotificationRepository::new(db);

    assert_eq!(repo.deliver_due(now).await?, 1);
    assert_eq!(repo.deliver_due(now).await?, 0);

    Ok(())
}

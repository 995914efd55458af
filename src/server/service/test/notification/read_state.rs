use super::*;

/// Tests reading another user's notifications.
///
/// Expected: Err(Forbidden) for the listing and for a single notification
#[tokio::test]
async fn recipients_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::create_notification(db, owner.id).await?;
    let service = NotificationService::new(db);

    let listing = service
        .find_by_user(
            other.id,
            owner.id,
            NotificationFilter::default(),
            PageRequest::default(),
        )
        .await;
    assert!(matches!(listing, Err(AppError::Forbidden(_))));
    assert!(matches!(
        service.get(other.id, notification.id).await,
        Err(AppError::Forbidden(_))
    ));

    Ok(())
}

/// Tests marking a single notification as read.
///
/// Verifies the first read timestamp is kept when it is marked again.
///
/// Expected: Ok with read_at set and unchanged on the second call
#[tokio::test]
async fn mark_as_read_keeps_first_timestamp() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let notification = factory::create_notification(db, user.id).await?;
    let service = NotificationService::new(db);

    let first = service.mark_as_read(user.id, notification.id).await?;
    let second = service.mark_as_read(user.id, notification.id).await?;

    assert!(first.read_at.is_some());
    assert_eq!(first.read_at, second.read_at);

    Ok(())
}

/// Tests marking everything read and the resulting stats.
///
/// Expected: Ok(2) and stats reporting 0 unread with recent activity
#[tokio::test]
async fn mark_all_as_read_updates_stats() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .notification_type(NotificationType::Achievement)
        .build()
        .await?;
    let service = NotificationService::new(db);

    let before = service.stats(user.id, user.id).await?;
    assert_eq!(before.unread_notifications, 2);

    let updated = service.mark_all_as_read(user.id, user.id).await?;
    assert_eq!(updated, 2);

    let after = service.stats(user.id, user.id).await?;
    assert_eq!(after.total_notifications, 2);
    assert_eq!(after.unread_notifications, 0);
    assert!(after.recent_activity);

    Ok(())
}

/// Tests deleting a notification.
///
/// Expected: Ok and NotFound on the next lookup
#[tokio::test]
async fn removes_notification() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let notification = factory::create_notification(db, user.id).await?;
    let service = NotificationService::new(db);

    service.remove(user.id, notification.id).await?;

    assert!(matches!(
        service.get(user.id, notification.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

use super::*;

/// Tests creating a social notification that names the triggering user.
///
/// Expected: Ok with the triggering user's summary attached
#[tokio::test]
async fn social_notification_carries_trigger() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let recipient = factory::create_user(db).await?;
    let actor = factory::create_user(db).await?;

    let notification = NotificationService::new(db)
        .create(CreateNotificationParams::social(
            recipient.id,
            actor.id,
            SocialNotificationDto {
                message: "liked your post".to_string(),
                action_url: None,
                action_text: None,
            },
        ))
        .await?;

    assert_eq!(notification.notification_type, NotificationType::SocialActivity);
    assert_eq!(
        notification.triggered_by_user.map(|u| u.id),
        Some(actor.id)
    );
    assert!(notification.delivered_at.is_some());

    Ok(())
}

/// Tests notifying an unknown recipient.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_recipient() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = NotificationService::new(db)
        .create(CreateNotificationParams::achievement(
            Uuid::new_v4(),
            AchievementNotificationDto {
                id: "first-5k".to_string(),
                title: "First 5k".to_string(),
                description: None,
            },
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that bulk creation fails as a whole when any recipient is unknown.
///
/// Expected: Err(NotFound) and no notifications stored
#[tokio::test]
async fn bulk_create_is_all_or_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let dto = AchievementNotificationDto {
        id: "streak-7".to_string(),
        title: "Seven day streak".to_string(),
        description: None,
    };
    let service = NotificationService::new(db);

    let result = service
        .create_bulk(vec![
            CreateNotificationParams::achievement(user.id, dto.clone()),
            CreateNotificationParams::achievement(Uuid::new_v4(), dto.clone()),
        ])
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let (page, unread) = service
        .find_by_user(
            user.id,
            user.id,
            NotificationFilter::default(),
            PageRequest::default(),
        )
        .await?;
    assert_eq!(page.total, 0);
    assert_eq!(unread, 0);

    let created = service
        .create_bulk(vec![CreateNotificationParams::achievement(user.id, dto)])
        .await?;
    assert_eq!(created, 1);

    Ok(())
}

/// Tests that scheduled notifications appear once their time has come.
///
/// Expected: Ok with the past-due notification listed and the future one hidden
#[tokio::test]
async fn lists_scheduled_notifications_when_due() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();
    factory::notification::NotificationFactory::new(db, user.id)
        .scheduled_for(now - Duration::minutes(10))
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .scheduled_for(now + Duration::days(1))
        .build()
        .await?;

    let (page, unread) = NotificationService::new(db)
        .find_by_user(
            user.id,
            user.id,
            NotificationFilter::default(),
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(unread, 1);

    Ok(())
}

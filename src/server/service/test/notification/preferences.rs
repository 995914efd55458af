use super::*;

/// Tests that a preference is created enabled and later updated in place.
///
/// Expected: Ok with one preference, disabled after the update
#[tokio::test]
async fn upserts_preference() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let service = NotificationService::new(db);

    let created = service
        .upsert_preference(
            user.id,
            UpsertPreferenceDto {
                notification_type: NotificationType::Reminder,
                delivery_channel: DeliveryChannel::Email,
                is_enabled: None,
                settings: None,
            },
        )
        .await?;
    assert!(created.is_enabled);

    let updated = service
        .update_preference(
            user.id,
            user.id,
            NotificationType::Reminder,
            DeliveryChannel::Email,
            UpdatePreferenceDto {
                is_enabled: Some(false),
                settings: None,
            },
        )
        .await?;
    assert_eq!(updated.id, created.id);
    assert!(!updated.is_enabled);

    let all = service.preferences(user.id, user.id).await?;
    assert_eq!(all.len(), 1);

    Ok(())
}

/// Tests changing another user's preferences.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_foreign_preference_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let result = NotificationService::new(db)
        .update_preference(
            other.id,
            owner.id,
            NotificationType::Reminder,
            DeliveryChannel::Push,
            UpdatePreferenceDto::default(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

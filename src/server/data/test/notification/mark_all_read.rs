use super::*;

/// Tests marking every unread notification as read.
///
/// Verifies that already read notifications are not counted again.
///
/// Expected: Ok(2) and no unread notifications remain
#[tokio::test]
async fn marks_unread_notifications() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .read()
        .build()
        .await?;
    let repo = NotificationRepository::new(db);

    let updated = repo.mark_all_read(user.id, Utc::now()).await?;

    assert_eq!(updated, 2);
    assert_eq!(repo.count_unread(user.id).await?, 0);

    Ok(())
}

/// Tests that marking one user's notifications leaves other users untouched.
///
/// Expected: Ok with the other user's notification still unread
#[tokio::test]
async fn only_affects_the_given_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, other.id).await?;
    let repo = NotificationRepository::new(db);

    repo.mark_all_read(user.id, Utc::now()).await?;

    assert_eq!(repo.count_unread(other.id).await?, 1);

    Ok(())
}

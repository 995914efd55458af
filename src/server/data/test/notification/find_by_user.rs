use super::*;

/// Tests the unread and category filters.
///
/// Expected: Ok with 2 unread, 1 in the social category
#[tokio::test]
async fn filters_unread_and_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .category("social")
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .category("workout")
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .category("social")
        .read()
        .build()
        .await?;
    let repo = NotificationRepository::new(db);

    let unread = repo
        .find_by_user(
            user.id,
            &NotificationFilter {
                unread_only: true,
                category: None,
            },
            PageRequest::default(),
        )
        .await?;
    let social_unread = repo
        .find_by_user(
            user.id,
            &NotificationFilter {
                unread_only: true,
                category: Some("social".to_string()),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(unread.total, 2);
    assert_eq!(social_unread.total, 1);
    assert_eq!(repo.count_unread(user.id).await?, 2);

    Ok(())
}

/// Tests that notifications are listed newest first and scoped to the recipient.
///
/// Expected: Ok with the newer notification first and none of the other user's
#[tokio::test]
async fn lists_newest_first_for_recipient() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_notification_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();
    let older = factory::notification::NotificationFactory::new(db, user.id)
        .created_at(now - Duration::hours(3))
        .build()
        .await?;
    let newer = factory::notification::NotificationFactory::new(db, user.id)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::create_notification(db, other.id).await?;

    let page = NotificationRepository::new(db)
        .find_by_user(user.id, &NotificationFilter::default(), PageRequest::default())
        .await?;

    let ids: Vec<_> = page.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

use super::*;

/// Tests joining and leaving a public group.
///
/// Verifies the member count follows active memberships.
///
/// Expected: Ok with member_count 2 after joining and 1 after leaving
#[tokio::test]
async fn join_and_leave_update_member_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    let service = GroupService::new(db);

    let membership = service.join(member.id, group.id, None).await?;
    assert_eq!(membership.status, MembershipStatus::Active);
    assert_eq!(membership.role, MembershipRole::Member);
    assert_eq!(service.get(group.id).await?.member_count, 2);

    service.leave(member.id, group.id).await?;
    assert_eq!(service.get(group.id).await?.member_count, 1);

    Ok(())
}

/// Tests joining a group twice.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_join() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    let service = GroupService::new(db);
    service.join(member.id, group.id, None).await?;

    let result = service.join(member.id, group.id, None).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests rejoining after leaving.
///
/// Expected: Ok with the membership active again
#[tokio::test]
async fn rejoins_after_leaving() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    let service = GroupService::new(db);
    service.join(member.id, group.id, None).await?;
    service.leave(member.id, group.id).await?;

    let membership = service.join(member.id, group.id, None).await?;

    assert_eq!(membership.status, MembershipStatus::Active);
    assert_eq!(service.get(group.id).await?.member_count, 2);

    Ok(())
}

/// Tests joining a group at capacity.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_join_when_full() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::group::GroupFactory::new(db, owner.id)
        .max_members(1)
        .build()
        .await?;

    let result = GroupService::new(db).join(member.id, group.id, None).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that private groups put new members in a pending state.
///
/// Expected: Ok with Pending status and member_count unchanged
#[tokio::test]
async fn private_group_join_is_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::group::GroupFactory::new(db, owner.id)
        .group_type(GroupType::Private)
        .build()
        .await?;
    let service = GroupService::new(db);

    let membership = service
        .join(member.id, group.id, Some("Let me in".to_string()))
        .await?;

    assert_eq!(membership.status, MembershipStatus::Pending);
    assert_eq!(membership.join_message.as_deref(), Some("Let me in"));
    assert_eq!(service.get(group.id).await?.member_count, 1);

    Ok(())
}

/// Tests that the owner cannot leave their own group.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn owner_cannot_leave() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;

    let result = GroupService::new(db).leave(owner.id, group.id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

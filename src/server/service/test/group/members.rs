use super::*;

/// Tests approving a pending member.
///
/// Expected: Ok with the member active and counted
#[tokio::test]
async fn owner_approves_pending_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    factory::create_membership(
        db,
        group.id,
        member.id,
        MembershipRole::Member,
        MembershipStatus::Pending,
    )
    .await?;
    let service = GroupService::new(db);

    let approved = service
        .update_member_role(
            owner.id,
            group.id,
            member.id,
            MembershipRole::Member,
            Some(MembershipStatus::Active),
        )
        .await?;

    assert_eq!(approved.status, MembershipStatus::Active);
    assert_eq!(service.get(group.id).await?.member_count, 2);

    Ok(())
}

/// Tests that approval is refused once the group is full.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn approval_respects_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::group::GroupFactory::new(db, owner.id)
        .max_members(1)
        .build()
        .await?;
    factory::create_membership(
        db,
        group.id,
        member.id,
        MembershipRole::Member,
        MembershipStatus::Pending,
    )
    .await?;

    let result = GroupService::new(db)
        .update_member_role(
            owner.id,
            group.id,
            member.id,
            MembershipRole::Member,
            Some(MembershipStatus::Active),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that an active admin may manage members but a regular member may not.
///
/// Expected: Ok for the admin, Err(Forbidden) for the member
#[tokio::test]
async fn only_managers_change_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let admin = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    factory::create_membership(
        db,
        group.id,
        admin.id,
        MembershipRole::Admin,
        MembershipStatus::Active,
    )
    .await?;
    factory::create_membership(
        db,
        group.id,
        member.id,
        MembershipRole::Member,
        MembershipStatus::Active,
    )
    .await?;
    let service = GroupService::new(db);

    let denied = service
        .update_member_role(member.id, group.id, admin.id, MembershipRole::Member, None)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let promoted = service
        .update_member_role(admin.id, group.id, member.id, MembershipRole::Moderator, None)
        .await?;
    assert_eq!(promoted.role, MembershipRole::Moderator);

    Ok(())
}

/// Tests that the owner role is never assignable.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn owner_role_cannot_be_assigned() -> Result<(), AppError> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let group = factory::create_group(db, owner.id).await?;
    factory::create_membership(
        db,
        group.id,
        member.id,
        MembershipRole::Member,
        MembershipStatus::Active,
    )
    .await?;

    let result = GroupService::new(db)
        .update_member_role(owner.id, group.id, member.id, MembershipRole::Owner, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

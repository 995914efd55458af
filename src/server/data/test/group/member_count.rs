use super::*;

/// Tests that increments stop at `max_members` inside the update itself.
///
/// Expected: Ok(Some(2)) for the first increment, Ok(None) once full with the count unchanged
#[tokio::test]
async fn increments_stop_at_capacity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let group = factory::group::GroupFactory::new(db, owner.id)
        .member_count(1)
        .max_members(2)
        .build()
        .await?;
    let repo = GroupRepository::new(db);

    assert_eq!(repo.adjust_member_count(group.id, 1).await?, Some(2));
    assert_eq!(repo.adjust_member_count(group.id, 1).await?, None);
    assert_eq!(repo.find_by_id(group.id).await?.unwrap().member_count, 2);

    assert_eq!(repo.adjust_member_count(group.id, -1).await?, Some(1));

    Ok(())
}

/// Tests groups without a member cap and decrements at zero.
///
/// Expected: Ok(Some(_)) for increments without a cap, Ok(None) when decrementing an empty count
#[tokio::test]
async fn uncapped_groups_and_empty_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let group = factory::group::GroupFactory::new(db, owner.id)
        .member_count(0)
        .build()
        .await?;
    let repo = GroupRepository::new(db);

    assert_eq!(repo.adjust_member_count(group.id, -1).await?, None);
    assert_eq!(repo.adjust_member_count(group.id, 3).await?, Some(3));

    Ok(())
}

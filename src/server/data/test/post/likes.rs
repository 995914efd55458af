use super::*;

/// Tests that counter updates apply the delta to the stored value and refuse to go negative.
///
/// Expected: Ok(1) then Ok(0), then Err(DbErr::RecordNotUpdated) with the counter still 0
#[tokio::test]
async fn likes_count_never_goes_negative() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let post = factory::create_post(db, user.id).await?;
    let repo = PostRepository::new(db);

    assert_eq!(repo.adjust_likes_count(post.id, 1).await?, 1);
    assert_eq!(repo.adjust_likes_count(post.id, -1).await?, 0);

    let result = repo.adjust_likes_count(post.id, -1).await;
    assert!(matches!(result, Err(DbErr::RecordNotUpdated)));
    assert_eq!(repo.find_by_id(post.id).await?.unwrap().likes_count, 0);

    Ok(())
}

/// Tests that the comments counter moves by more than one in a single update.
///
/// Expected: Ok(3) after adding 3 and Ok(1) after removing 2
#[tokio::test]
async fn comments_count_applies_whole_delta() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let post = factory::create_post(db, user.id).await?;
    let repo = PostRepository::new(db);

    assert_eq!(repo.adjust_comments_count(post.id, 3).await?, 3);
    assert_eq!(repo.adjust_comments_count(post.id, -2).await?, 1);

    Ok(())
}

/// Tests adjusting a counter on an unknown post.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn counter_update_fails_for_missing_post() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = PostRepository::new(db)
        .adjust_likes_count(Uuid::new_v4(), 1)
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

/// Tests creating, finding and deleting a like row.
///
/// Expected: Ok with the like present only between create and delete
#[tokio::test]
async fn like_rows_round_trip() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let repo = PostRepository::new(db);

    assert!(repo.find_like(post.id, fan.id).await?.is_none());

    repo.create_like(post.id, fan.id).await?;
    let like = repo.find_like(post.id, fan.id).await?.unwrap();
    assert!(repo.find_like(post.id, author.id).await?.is_none());

    repo.delete_like(like.id).await?;
    assert!(repo.find_like(post.id, fan.id).await?.is_none());

    Ok(())
}

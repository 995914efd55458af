use super::*;

/// Tests toggling a like twice.
///
/// Expected: Ok with liked then unliked and the counter back at 0
#[tokio::test]
async fn toggles_post_like() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let service = PostService::new(db);

    let first = service.toggle_like(fan.id, post.id).await?;
    assert!(first.liked);
    assert_eq!(first.likes_count, 1);

    let second = service.toggle_like(fan.id, post.id).await?;
    assert!(!second.liked);
    assert_eq!(second.likes_count, 0);

    Ok(())
}

/// Tests that private posts are only visible to their author.
///
/// Expected: Err(Forbidden) for others and for anonymous viewers, Ok for the author
#[tokio::test]
async fn private_posts_are_author_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let post = factory::post::PostFactory::new(db, author.id)
        .visibility(PostVisibility::Private)
        .build()
        .await?;
    let service = PostService::new(db);

    assert!(matches!(
        service.get(Some(other.id), post.id).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.get(None, post.id).await,
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(service.get(Some(author.id), post.id).await?.id, post.id);

    Ok(())
}

/// Tests soft deleting a post.
///
/// Expected: Err(Forbidden) for a non-author, then NotFound after the author deletes it
#[tokio::test]
async fn only_author_removes_post() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let service = PostService::new(db);

    assert!(matches!(
        service.remove(other.id, post.id).await,
        Err(AppError::Forbidden(_))
    ));

    service.remove(author.id, post.id).await?;

    assert!(matches!(
        service.get(Some(author.id), post.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that a blank search term is rejected.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_blank_search() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = PostService::new(db)
        .search("   ", Default::default())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

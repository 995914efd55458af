use super::*;

/// Tests that creating and removing comments maintains the post's comment count.
///
/// Expected: Ok with comments_count 2 after two comments and 1 after a removal
#[tokio::test]
async fn maintains_post_comment_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let commenter = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let comments = CommentService::new(db);
    let posts = PostService::new(db);

    let first = comments
        .create(comment_params(post.id, commenter.id, None))
        .await?;
    let reply = comments
        .create(comment_params(post.id, author.id, Some(first.id)))
        .await?;
    assert_eq!(posts.get(None, post.id).await?.comments_count, 2);

    comments.remove(author.id, reply.id).await?;
    assert_eq!(posts.get(None, post.id).await?.comments_count, 1);

    Ok(())
}

/// Tests that removing a comment also removes the replies beneath it.
///
/// Verifies nested replies are deactivated and leave the post's comment count, and that
/// removing a reply of a removed thread reports it missing.
///
/// Expected: Ok with comments_count 1 after removing a thread of 3, then Err(NotFound)
#[tokio::test]
async fn removing_comment_removes_its_replies() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let commenter = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let comments = CommentService::new(db);
    let posts = PostService::new(db);

    let thread = comments
        .create(comment_params(post.id, commenter.id, None))
        .await?;
    let reply = comments
        .create(comment_params(post.id, author.id, Some(thread.id)))
        .await?;
    let nested = comments
        .create(comment_params(post.id, commenter.id, Some(reply.id)))
        .await?;
    comments
        .create(comment_params(post.id, author.id, None))
        .await?;
    assert_eq!(posts.get(None, post.id).await?.comments_count, 4);

    comments.remove(commenter.id, thread.id).await?;

    assert_eq!(posts.get(None, post.id).await?.comments_count, 1);
    assert!(matches!(comments.get(reply.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(comments.get(nested.id).await, Err(AppError::NotFound(_))));

    let again = comments.remove(author.id, reply.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests replying with a parent comment from another post.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_parent_from_other_post() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let post = factory::create_post(db, user.id).await?;
    let other_post = factory::create_post(db, user.id).await?;
    let parent = factory::create_comment(db, other_post.id, user.id, None).await?;

    let result = CommentService::new(db)
        .create(comment_params(post.id, user.id, Some(parent.id)))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that comment likes toggle per user.
///
/// Expected: Ok with 2 likes from two users and 1 after one of them unlikes
#[tokio::test]
async fn toggles_comment_like() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;
    let comment = factory::create_comment(db, post.id, author.id, None).await?;
    let service = CommentService::new(db);

    service.toggle_like(first.id, comment.id).await?;
    let both = service.toggle_like(second.id, comment.id).await?;
    assert_eq!(both.likes_count, 2);

    let undone = service.toggle_like(first.id, comment.id).await?;
    assert!(!undone.liked);
    assert_eq!(undone.likes_count, 1);

    Ok(())
}

/// Tests commenting on a soft-deleted post.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_comment_on_inactive_post() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let post = factory::post::PostFactory::new(db, user.id)
        .is_active(false)
        .build()
        .await?;

    let result = CommentService::new(db)
        .create(comment_params(post.id, user.id, None))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

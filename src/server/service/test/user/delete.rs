use super::*;

/// Tests deleting an account together with the rows it owns.
///
/// Expected: Ok with the user, their post and their health log gone
#[tokio::test]
async fn deletes_account_and_owned_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_social_tables()
        .with_tracking_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let post = factory::create_post(db, user.id).await?;
    let log = factory::create_health_log(
        db,
        user.id,
        chrono::Utc::now().date_naive(),
        Some(2000),
        Some(8000),
    )
    .await?;
    let service = UserService::new(db);

    service.delete(user.id, user.id).await?;

    assert!(matches!(service.get_by_id(user.id).await, Err(AppError::NotFound(_))));
    assert!(PostRepository::new(db).find_by_id(post.id).await?.is_none());
    assert!(HealthLogRepository::new(db).find_by_id(log.id).await?.is_none());

    Ok(())
}

/// Tests deleting somebody else's account.
///
/// Expected: Err(Forbidden) and the account still present
#[tokio::test]
async fn rejects_delete_of_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let target = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let service = UserService::new(db);

    let result = service.delete(intruder.id, target.id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(service.get_by_id(target.id).await.is_ok());

    Ok(())
}

/// Tests deleting an account twice.
///
/// Expected: Err(NotFound) on the second delete
#[tokio::test]
async fn second_delete_reports_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let service = UserService::new(db);
    service.delete(user.id, user.id).await?;

    let result = service.delete(user.id, user.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

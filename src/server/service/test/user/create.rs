use super::*;

/// Tests registering a local account.
///
/// Expected: Ok with the profile fields stored and a local auth source
#[tokio::test]
async fn registers_local_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserService::new(db)
        .create(registration("jordan@example.com"))
        .await?;

    assert_eq!(user.email, "jordan@example.com");
    assert_eq!(user.name.as_deref(), Some("Jordan"));
    assert_eq!(user.interests, vec!["running".to_string()]);
    assert!(user.is_active);

    Ok(())
}

/// Tests registering an email that already has an account.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);
    service.create(registration("jordan@example.com")).await?;

    let result = service.create(registration("jordan@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

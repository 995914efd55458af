use super::*;

/// Tests updating the caller's own profile.
///
/// Expected: Ok with changed fields updated and omitted fields kept
#[tokio::test]
async fn updates_own_profile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);
    let user = service.create(registration("jordan@example.com")).await?;

    let updated = service
        .update(
            user.id,
            user.id,
            UpdateUserParams {
                bio: Some("Trail runner".to_string()),
                email: Some("jordan.runs@example.com".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.bio.as_deref(), Some("Trail runner"));
    assert_eq!(updated.email, "jordan.runs@example.com");
    assert_eq!(updated.name.as_deref(), Some("Jordan"));

    Ok(())
}

/// Tests keeping the current email in an update.
///
/// Expected: Ok since the email belongs to the caller
#[tokio::test]
async fn allows_unchanged_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);
    let user = service.create(registration("jordan@example.com")).await?;

    let updated = service
        .update(
            user.id,
            user.id,
            UpdateUserParams {
                email: Some("jordan@example.com".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.email, "jordan@example.com");

    Ok(())
}

/// Tests changing the email to one another account uses.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_email_collision() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);
    let user = service.create(registration("jordan@example.com")).await?;
    service.create(registration("casey@example.com")).await?;

    let result = service
        .update(
            user.id,
            user.id,
            UpdateUserParams {
                email: Some("casey@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests updating somebody else's profile.
///
/// Expected: Err(Forbidden) and the profile unchanged
#[tokio::test]
async fn rejects_update_of_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let target = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let service = UserService::new(db);

    let result = service
        .update(
            intruder.id,
            target.id,
            UpdateUserParams {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(service.get_by_id(target.id).await?.name, target.name);

    Ok(())
}

use super::*;

/// Tests creating a role and listing it back.
///
/// Expected: Ok with roles listed by name and the permission map stored as given
#[tokio::test]
async fn creates_and_lists_roles_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RoleService::new(db);

    let moderator = service.create(role("moderator")).await?;
    service.create(role("coach")).await?;

    assert!(moderator.is_active);
    assert_eq!(
        moderator.permissions,
        Some(json!({"posts": ["read", "delete"]}))
    );

    let names: Vec<String> = service
        .find_all()
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["coach".to_string(), "moderator".to_string()]);

    assert_eq!(service.get_by_id(moderator.id).await?, moderator);

    Ok(())
}

/// Tests creating a role whose name is taken.
///
/// Expected: Err(Conflict) naming the role and a single stored row
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RoleService::new(db);

    service.create(role("moderator")).await?;
    let result = service.create(role("moderator")).await;

    assert!(
        matches!(&result, Err(AppError::Conflict(message)) if message == "Role 'moderator' already exists")
    );
    assert_eq!(service.find_all().await?.len(), 1);

    Ok(())
}

/// Tests fetching a role that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_role_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RoleService::new(db).get_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

use super::*;

/// Tests a partial update that keeps the current name.
///
/// Expected: Ok with description and active flag changed and permissions untouched
#[tokio::test]
async fn updates_fields_and_keeps_the_rest() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RoleService::new(db);
    let created = service.create(role("moderator")).await?;

    let updated = service
        .update(
            created.id,
            UpdateRoleParams {
                name: Some("moderator".to_string()),
                description: Some("Reviews reported posts".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "moderator");
    assert_eq!(updated.description.as_deref(), Some("Reviews reported posts"));
    assert!(!updated.is_active);
    assert_eq!(updated.permissions, created.permissions);

    Ok(())
}

/// Tests renaming a role to a name used by another role.
///
/// Expected: Err(Conflict) and the original name kept
#[tokio::test]
async fn rejects_rename_collision() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RoleService::new(db);
    service.create(role("moderator")).await?;
    let coach = service.create(role("coach")).await?;

    let result = service
        .update(
            coach.id,
            UpdateRoleParams {
                name: Some("moderator".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(service.get_by_id(coach.id).await?.name, "coach");

    Ok(())
}

/// Tests updating a role that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn update_of_missing_role_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RoleService::new(db)
        .update(Uuid::new_v4(), UpdateRoleParams::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests deleting a role twice.
///
/// Expected: Ok for the first delete, Err(NotFound) for the second and for lookups
#[tokio::test]
async fn deletes_role_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_role_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RoleService::new(db);
    let created = service.create(role("moderator")).await?;

    service.delete(created.id).await?;

    assert!(matches!(service.get_by_id(created.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.delete(created.id).await, Err(AppError::NotFound(_))));
    assert!(service.find_all().await?.is_empty());

    Ok(())
}

use super::*;

/// Tests that a protected request without a token is rejected.
///
/// Expected: Err(AuthErr(MissingToken))
#[tokio::test]
async fn require_rejects_missing_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let provider = StaticIdentityProvider::new();

    let result = AuthGuard::new(db, &provider).require(&HeaderMap::new()).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::MissingToken))));

    Ok(())
}

/// Tests that a token unknown to the provider is rejected.
///
/// Expected: Err(AuthErr(InvalidToken))
#[tokio::test]
async fn require_rejects_unknown_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let provider = StaticIdentityProvider::new();

    let result = AuthGuard::new(db, &provider)
        .require(&headers_with("Bearer nope"))
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidToken(_)))));

    Ok(())
}

/// Tests that the first request for a provider account creates a local user.
///
/// Verifies the created user is linked to the provider subject and takes its name
/// from the provider metadata.
///
/// Expected: Ok(User) and a second call resolves the same user
#[tokio::test]
async fn require_creates_user_on_first_login() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let provider =
        StaticIdentityProvider::new().with_account("tok", "sub-42", Some("Casey@Example.com"));
    let guard = AuthGuard::new(db, &provider);

    let first = guard.require(&headers_with("Bearer tok")).await.unwrap();
    let second = guard.require(&headers_with("Bearer tok")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.email, "casey@example.com");
    assert_eq!(first.name.as_deref(), Some("Casey Runner"));
    assert_eq!(first.supabase_id.as_deref(), Some("sub-42"));

    Ok(())
}

/// Tests that an existing local account is linked by email.
///
/// Expected: Ok(User) with the factory user's id
#[tokio::test]
async fn require_links_existing_user_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::user::UserFactory::new(db)
        .email("linked@example.com")
        .build()
        .await?;
    let provider =
        StaticIdentityProvider::new().with_account("tok", "sub-7", Some("linked@example.com"));

    let user = AuthGuard::new(db, &provider)
        .require(&headers_with("Bearer tok"))
        .await
        .unwrap();

    assert_eq!(user.id, existing.id);
    assert_eq!(user.supabase_id.as_deref(), Some("sub-7"));

    Ok(())
}

/// Tests that a deactivated account cannot authenticate.
///
/// Expected: Err(AuthErr(InactiveUser))
#[tokio::test]
async fn require_rejects_inactive_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::user::UserFactory::new(db)
        .supabase_id("sub-9")
        .is_active(false)
        .build()
        .await?;
    let provider = StaticIdentityProvider::new().with_account("tok", "sub-9", None);

    let result = AuthGuard::new(db, &provider)
        .require(&headers_with("Bearer tok"))
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InactiveUser(_)))));

    Ok(())
}

/// Tests the optional guard on an anonymous request.
///
/// Expected: Ok(None)
#[tokio::test]
async fn optional_allows_anonymous() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let provider = StaticIdentityProvider::new();

    let user = AuthGuard::new(db, &provider)
        .optional(&HeaderMap::new())
        .await
        .unwrap();

    assert!(user.is_none());

    Ok(())
}

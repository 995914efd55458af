use super::*;

/// Tests that reviews update the item's average rating.
///
/// Expected: Ok with rating 4.5 over 2 reviews
#[tokio::test]
async fn recomputes_item_rating() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);

    service
        .create_review(first.id, item.id, 5, Some("Great".to_string()))
        .await?;
    service.create_review(second.id, item.id, 4, None).await?;

    let (page, rating) = service.reviews(item.id, PageRequest::default()).await?;
    assert_eq!(page.total, 2);
    assert_eq!(rating, 4.5);

    let item = MarketplaceItemRepository::new(db)
        .find_by_id(item.id)
        .await?
        .unwrap();
    assert_eq!(item.reviews_count, 2);

    Ok(())
}

/// Tests reviewing the same item twice.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_review() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let reviewer = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    service.create_review(reviewer.id, item.id, 3, None).await?;

    let result = service.create_review(reviewer.id, item.id, 5, None).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that sellers cannot review their own items.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_review_by_seller() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;

    let result = MarketplaceService::new(db)
        .create_review(seller.id, item.id, 5, None)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

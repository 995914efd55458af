use super::*;

/// Tests adding and removing a favorite.
///
/// Verifies the item's favorites counter follows the favorite rows.
///
/// Expected: Ok with count 1 after adding and 0 after removing
#[tokio::test]
async fn tracks_favorites_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    let items = MarketplaceItemRepository::new(db);

    service.add_favorite(fan.id, item.id).await?;
    assert_eq!(items.find_by_id(item.id).await?.unwrap().favorites_count, 1);

    let favorites = service.favorites(fan.id, PageRequest::default()).await?;
    assert_eq!(favorites.items.len(), 1);
    assert_eq!(favorites.items[0].id, item.id);

    service.remove_favorite(fan.id, item.id).await?;
    assert_eq!(items.find_by_id(item.id).await?.unwrap().favorites_count, 0);

    Ok(())
}

/// Tests favoriting an item twice and removing a missing favorite.
///
/// Expected: Err(Conflict) then Err(NotFound)
#[tokio::test]
async fn rejects_duplicate_and_missing_favorites() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    service.add_favorite(fan.id, item.id).await?;

    let duplicate = service.add_favorite(fan.id, item.id).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let missing = service.remove_favorite(seller.id, item.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that removing an item hides it from public listings but not the seller's history.
///
/// Expected: Ok with the item absent from stats and lookups returning NotFound
#[tokio::test]
async fn removed_items_are_hidden() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);

    service.remove(seller.id, item.id).await?;

    assert!(matches!(service.find_one(item.id).await, Err(AppError::NotFound(_))));
    assert_eq!(service.stats().await?.total_items, 1);
    let removed = service
        .find_by_user(seller.id, Some(ItemStatus::Removed), PageRequest::default())
        .await?;
    assert_eq!(removed.total, 1);

    Ok(())
}

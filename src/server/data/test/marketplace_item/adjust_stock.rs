use super::*;

/// Tests selling part of the stock.
///
/// Expected: Ok with slots decreased, sold count increased and status unchanged
#[tokio::test]
async fn moves_units_from_slots_to_sold() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;

    let updated = MarketplaceItemRepository::new(db)
        .adjust_stock(item.id, 3)
        .await?
        .unwrap();

    assert_eq!(updated.available_slots, 7);
    assert_eq!(updated.sold_count, 3);
    assert_eq!(updated.status, ItemStatus::Active);

    Ok(())
}

/// Tests that selling the last unit marks the item sold out and returning it reactivates it.
///
/// Expected: Ok with SoldOut after the sale and Active after the return
#[tokio::test]
async fn toggles_sold_out_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .available_slots(2)
        .build()
        .await?;
    let repo = MarketplaceItemRepository::new(db);

    let sold_out = repo.adjust_stock(item.id, 2).await?.unwrap();
    assert_eq!(sold_out.available_slots, 0);
    assert_eq!(sold_out.status, ItemStatus::SoldOut);

    let restocked = repo.adjust_stock(item.id, -1).await?.unwrap();
    assert_eq!(restocked.available_slots, 1);
    assert_eq!(restocked.sold_count, 1);
    assert_eq!(restocked.status, ItemStatus::Active);

    Ok(())
}

/// Tests that a sale larger than the remaining slots leaves the row untouched.
///
/// Expected: Ok(None) for the oversized sale, then a second sale of the last slot
/// succeeds exactly once
#[tokio::test]
async fn refuses_to_oversell() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .available_slots(1)
        .build()
        .await?;
    let repo = MarketplaceItemRepository::new(db);

    assert!(repo.adjust_stock(item.id, 2).await?.is_none());

    let unchanged = repo.find_by_id(item.id).await?.unwrap();
    assert_eq!(unchanged.available_slots, 1);
    assert_eq!(unchanged.sold_count, 0);

    assert!(repo.adjust_stock(item.id, 1).await?.is_some());
    assert!(repo.adjust_stock(item.id, 1).await?.is_none());

    let sold = repo.find_by_id(item.id).await?.unwrap();
    assert_eq!(sold.available_slots, 0);
    assert_eq!(sold.sold_count, 1);

    Ok(())
}

/// Tests that only active listings can be sold from and returns never exceed sales.
///
/// Expected: Ok(None) for a sale from an inactive item and for returning unsold units
#[tokio::test]
async fn guards_inactive_items_and_returns() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let inactive = factory::marketplace::ItemFactory::new(db, seller.id)
        .status(ItemStatus::Inactive)
        .build()
        .await?;
    let active = factory::create_item(db, seller.id).await?;
    let repo = MarketplaceItemRepository::new(db);

    assert!(repo.adjust_stock(inactive.id, 1).await?.is_none());
    assert!(repo.adjust_stock(active.id, -1).await?.is_none());

    let untouched = repo.find_by_id(active.id).await?.unwrap();
    assert_eq!(untouched.available_slots, 10);
    assert_eq!(untouched.sold_count, 0);

    Ok(())
}

/// Tests adjusting stock of an unknown item.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MarketplaceItemRepository::new(db)
        .adjust_stock(uuid::Uuid::new_v4(), 1)
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

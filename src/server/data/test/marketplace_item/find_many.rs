use super::*;

/// Tests that only active listings are browsable.
///
/// Verifies that sold out and removed items are hidden from the catalogue.
///
/// Expected: Ok with only the active item
#[tokio::test]
async fn lists_only_active_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let active = factory::create_item(db, seller.id).await?;
    factory::marketplace::ItemFactory::new(db, seller.id)
        .status(ItemStatus::SoldOut)
        .build()
        .await?;
    factory::marketplace::ItemFactory::new(db, seller.id)
        .status(ItemStatus::Removed)
        .build()
        .await?;

    let page = MarketplaceItemRepository::new(db)
        .find_many(&ItemFilter::default(), PageRequest::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, active.id);

    Ok(())
}

/// Tests price bounds combined with ascending price order.
///
/// Expected: Ok with the two in-range items cheapest first
#[tokio::test]
async fn filters_by_price_and_sorts_ascending() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    for price in [5.0, 25.0, 15.0, 80.0] {
        factory::marketplace::ItemFactory::new(db, seller.id)
            .price(price)
            .build()
            .await?;
    }

    let filter = ItemFilter {
        min_price: Some(10.0),
        max_price: Some(50.0),
        sort_by: ItemSortField::Price,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    let page = MarketplaceItemRepository::new(db)
        .find_many(&filter, PageRequest::default())
        .await?;

    let prices: Vec<f64> = page.items.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![15.0, 25.0]);

    Ok(())
}

/// Tests category and location filters together.
///
/// Expected: Ok with the single fitness equipment item in Berlin
#[tokio::test]
async fn filters_by_category_and_location() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let wanted = factory::marketplace::ItemFactory::new(db, seller.id)
        .category(ItemCategory::FitnessEquipment)
        .location("Berlin, Germany")
        .build()
        .await?;
    factory::marketplace::ItemFactory::new(db, seller.id)
        .category(ItemCategory::FitnessEquipment)
        .location("Paris")
        .build()
        .await?;
    factory::marketplace::ItemFactory::new(db, seller.id)
        .location("Berlin")
        .build()
        .await?;

    let filter = ItemFilter {
        category: Some(ItemCategory::FitnessEquipment),
        location: Some("berlin".to_string()),
        ..Default::default()
    };
    let page = MarketplaceItemRepository::new(db)
        .find_many(&filter, PageRequest::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, wanted.id);

    Ok(())
}

/// Tests that a seller's listing hides removed items unless asked for.
///
/// Expected: Ok with 1 item by default and 1 when filtering for removed
#[tokio::test]
async fn seller_listing_hides_removed_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    factory::create_item(db, seller.id).await?;
    factory::marketplace::ItemFactory::new(db, seller.id)
        .status(ItemStatus::Removed)
        .build()
        .await?;
    let repo = MarketplaceItemRepository::new(db);

    let listed = repo
        .find_by_user(seller.id, None, PageRequest::default())
        .await?;
    let removed = repo
        .find_by_user(seller.id, Some(ItemStatus::Removed), PageRequest::default())
        .await?;

    assert_eq!(listed.total, 1);
    assert_eq!(removed.total, 1);
    assert_eq!(removed.items[0].status, ItemStatus::Removed);

    Ok(())
}

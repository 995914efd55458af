use super::*;

/// Tests placing an order.
///
/// Verifies the total is the unit price times quantity without shipping and that
/// the ordered units leave the available stock.
///
/// Expected: Ok with total 91.98, 8 slots left and 2 sold
#[tokio::test]
async fn creates_order_and_reserves_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .price(45.99)
        .shipping_cost(5.0)
        .build()
        .await?;

    let order = MarketplaceService::new(db)
        .create_order(order_params(item.id, buyer.id, 2))
        .await?;

    assert_eq!(order.total_price, 91.98);
    assert_eq!(order.unit_price, 45.99);
    assert_eq!(order.shipping_cost, 5.0);
    assert_eq!(order.seller_id, seller.id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(stock(db, item.id).await, (8, 2, ItemStatus::Active));

    Ok(())
}

/// Tests ordering more units than are available.
///
/// Expected: Err(Conflict) and stock unchanged
#[tokio::test]
async fn rejects_order_exceeding_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .available_slots(1)
        .build()
        .await?;

    let result = MarketplaceService::new(db)
        .create_order(order_params(item.id, buyer.id, 2))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(stock(db, item.id).await, (1, 0, ItemStatus::Active));

    Ok(())
}

/// Tests that sellers cannot buy their own listing.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_order_for_own_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;

    let result = MarketplaceService::new(db)
        .create_order(order_params(item.id, seller.id, 1))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests ordering a removed item.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_order_for_removed_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .status(ItemStatus::Removed)
        .build()
        .await?;

    let result = MarketplaceService::new(db)
        .create_order(order_params(item.id, buyer.id, 1))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that buying the last unit sells the item out and cancelling restores it.
///
/// Expected: Ok with SoldOut after the order and Active with 1 slot after cancelling
#[tokio::test]
async fn cancelling_restores_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .available_slots(1)
        .build()
        .await?;
    let service = MarketplaceService::new(db);

    let order = service
        .create_order(order_params(item.id, buyer.id, 1))
        .await?;
    assert_eq!(stock(db, item.id).await, (0, 1, ItemStatus::SoldOut));

    let cancelled = service
        .update_order_status(buyer.id, order.id, OrderStatus::Cancelled)
        .await?;

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(stock(db, item.id).await, (1, 0, ItemStatus::Active));

    Ok(())
}

/// Tests that a second cancellation of the same order does not return stock twice.
///
/// Expected: Err(Conflict) on the second cancel and stock restored exactly once
#[tokio::test]
async fn cancelling_twice_restores_stock_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::marketplace::ItemFactory::new(db, seller.id)
        .available_slots(3)
        .build()
        .await?;
    let service = MarketplaceService::new(db);
    let order = service
        .create_order(order_params(item.id, buyer.id, 2))
        .await?;

    service
        .update_order_status(buyer.id, order.id, OrderStatus::Cancelled)
        .await?;
    let again = service
        .update_order_status(seller.id, order.id, OrderStatus::Cancelled)
        .await;

    assert!(matches!(again, Err(AppError::Conflict(_))));
    assert_eq!(stock(db, item.id).await, (3, 0, ItemStatus::Active));

    Ok(())
}

/// Tests that a status change based on a stale read is not applied.
///
/// Expected: Ok(None) when the expected current status no longer matches
#[tokio::test]
async fn transition_requires_expected_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let order = MarketplaceService::new(db)
        .create_order(order_params(item.id, buyer.id, 1))
        .await?;
    let orders = MarketplaceOrderRepository::new(db);

    let stale = orders
        .transition(order.id, OrderStatus::Confirmed, OrderStatus::Shipped)
        .await?;
    assert!(stale.is_none());

    let confirmed = orders
        .transition(order.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await?
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    Ok(())
}

/// Tests the seller moving an order forward one step at a time.
///
/// Verifies that skipping a step and buyer-driven fulfilment are rejected.
///
/// Expected: Ok for pending to confirmed, Err(Conflict) otherwise
#[tokio::test]
async fn enforces_status_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    let order = service
        .create_order(order_params(item.id, buyer.id, 1))
        .await?;

    let skipped = service
        .update_order_status(seller.id, order.id, OrderStatus::Shipped)
        .await;
    assert!(matches!(skipped, Err(AppError::Conflict(_))));

    let by_buyer = service
        .update_order_status(buyer.id, order.id, OrderStatus::Confirmed)
        .await;
    assert!(matches!(by_buyer, Err(AppError::Conflict(_))));

    let confirmed = service
        .update_order_status(seller.id, order.id, OrderStatus::Confirmed)
        .await?;
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    Ok(())
}

/// Tests that users unrelated to an order cannot change it.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn rejects_status_change_by_stranger() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    let order = service
        .create_order(order_params(item.id, buyer.id, 1))
        .await?;

    let result = service
        .update_order_status(stranger.id, order.id, OrderStatus::Cancelled)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that a buyer only sees their own orders.
///
/// Expected: Ok with 1 order for the buyer and none for the seller
#[tokio::test]
async fn lists_buyer_orders() -> Result<(), AppError> {
    let test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let seller = factory::create_user(db).await?;
    let buyer = factory::create_user(db).await?;
    let item = factory::create_item(db, seller.id).await?;
    let service = MarketplaceService::new(db);
    service
        .create_order(order_params(item.id, buyer.id, 1))
        .await?;

    let mine = service.my_orders(buyer.id, PageRequest::default()).await?;
    let sellers = service.my_orders(seller.id, PageRequest::default()).await?;

    assert_eq!(mine.total, 1);
    assert_eq!(sellers.total, 0);

    Ok(())
}

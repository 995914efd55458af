use entity::{marketplace_item::ItemStatus, marketplace_order::OrderStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{
        marketplace_favorite::MarketplaceFavoriteRepository,
        marketplace_item::MarketplaceItemRepository,
        marketplace_order::MarketplaceOrderRepository,
        marketplace_review::MarketplaceReviewRepository,
    },
    error::AppError,
    model::marketplace::{
        average_rating, transition_allowed, CreateItemParams, CreateOrderParams, Item, ItemFilter,
        MarketplaceStats, Order, Review, UpdateItemParams,
    },
    util::pagination::{Page, PageRequest},
};

pub struct MarketplaceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MarketplaceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateItemParams) -> Result<Item, AppError> {
        Ok(MarketplaceItemRepository::new(self.db).create(params).await?)
    }

    pub async fn find_many(
        &self,
        filter: ItemFilter,
        request: PageRequest,
    ) -> Result<Page<Item>, AppError> {
        Ok(MarketplaceItemRepository::new(self.db)
            .find_many(&filter, request)
            .await?)
    }

    /// Aggregates over every listing that has not been removed.
    pub async fn stats(&self) -> Result<MarketplaceStats, AppError> {
        let items = MarketplaceItemRepository::new(self.db).find_listed().await?;

        Ok(MarketplaceStats::from_items(&items))
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<ItemStatus>,
        request: PageRequest,
    ) -> Result<Page<Item>, AppError> {
        Ok(MarketplaceItemRepository::new(self.db)
            .find_by_user(user_id, status, request)
            .await?)
    }

    /// Gets a listed item and counts the view.
    ///
    /// # Returns
    /// - `Ok(Item)` - Item with the incremented `views_count`
    /// - `Err(AppError::NotFound)` - Item missing or removed
    pub async fn find_one(&self, id: Uuid) -> Result<Item, AppError> {
        listed_item(self.db, id).await?;

        Ok(MarketplaceItemRepository::new(self.db).record_view(id).await?)
    }

    /// Updates a listing.
    ///
    /// # Access Control
    /// - Seller only
    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        params: UpdateItemParams,
    ) -> Result<Item, AppError> {
        let item = listed_item(self.db, id).await?;
        ensure_seller(&item, caller_id, "You can only update your own items")?;

        Ok(MarketplaceItemRepository::new(self.db)
            .update(id, params)
            .await?)
    }

    /// Marks a listing as removed. Seller only.
    pub async fn remove(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let item = listed_item(self.db, id).await?;
        ensure_seller(&item, caller_id, "You can only delete your own items")?;

        MarketplaceItemRepository::new(self.db)
            .set_status(id, ItemStatus::Removed)
            .await?;

        Ok(())
    }

    /// Reviews an item and refreshes its rating.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller is the seller
    /// - `Err(AppError::Conflict)` - Caller already reviewed the item
    pub async fn create_review(
        &self,
        caller_id: Uuid,
        id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, AppError> {
        let txn = self.db.begin().await?;
        let reviews = MarketplaceReviewRepository::new(&txn);

        let item = listed_item(&txn, id).await?;
        if item.user_id == caller_id {
            return Err(AppError::Forbidden(
                "You cannot review your own item".to_string(),
            ));
        }
        if reviews.exists(id, caller_id).await? {
            return Err(AppError::Conflict(
                "You have already reviewed this item".to_string(),
            ));
        }

        let review = reviews.create(id, caller_id, rating, comment).await?;

        let ratings = reviews.ratings(id).await?;
        MarketplaceItemRepository::new(&txn)
            .set_rating(id, average_rating(&ratings), ratings.len() as i32)
            .await?;

        txn.commit().await?;

        Ok(review)
    }

    /// Returns a page of reviews and the item's average rating.
    pub async fn reviews(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<(Page<Review>, f64), AppError> {
        let item = listed_item(self.db, id).await?;
        let page = MarketplaceReviewRepository::new(self.db)
            .find_by_item(id, request)
            .await?;

        Ok((page, item.rating))
    }

    pub async fn add_favorite(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let favorites = MarketplaceFavoriteRepository::new(&txn);

        listed_item(&txn, id).await?;
        if favorites.exists(id, caller_id).await? {
            return Err(AppError::Conflict("Item already in favorites".to_string()));
        }

        favorites.create(id, caller_id).await?;
        MarketplaceItemRepository::new(&txn)
            .adjust_favorites_count(id, 1)
            .await?;

        txn.commit().await?;

        Ok(())
    }

    pub async fn remove_favorite(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if !MarketplaceFavoriteRepository::new(&txn)
            .delete(id, caller_id)
            .await?
        {
            return Err(AppError::not_found("Favorite"));
        }

        MarketplaceItemRepository::new(&txn)
            .adjust_favorites_count(id, -1)
            .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Items a user has favorited, most recent first. Removed items are skipped.
    pub async fn favorites(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Item>, AppError> {
        let ids = MarketplaceFavoriteRepository::new(self.db)
            .find_item_ids(user_id, request)
            .await?;
        let mut items = MarketplaceItemRepository::new(self.db)
            .find_by_ids(&ids.items)
            .await?;
        items.retain(|item| item.status != ItemStatus::Removed);

        let ordered = ids
            .items
            .iter()
            .filter_map(|id| items.iter().find(|item| item.id == *id).cloned())
            .collect();

        Ok(Page::new(ordered, ids.total, request))
    }

    /// Places an order and takes the units out of stock.
    ///
    /// # Returns
    /// - `Ok(Order)` - Pending order with snapshotted prices
    /// - `Err(AppError::NotFound)` - Item missing or removed
    /// - `Err(AppError::Forbidden)` - Caller is the seller
    /// - `Err(AppError::Conflict)` - Item not active, or not enough slots left
    pub async fn create_order(&self, params: CreateOrderParams) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let items = MarketplaceItemRepository::new(&txn);

        let item = listed_item(&txn, params.item_id).await?;
        if item.status != ItemStatus::Active {
            return Err(AppError::Conflict(
                "Item is not available for purchase".to_string(),
            ));
        }
        if item.user_id == params.buyer_id {
            return Err(AppError::Forbidden(
                "You cannot order your own item".to_string(),
            ));
        }
        if item.available_slots < params.quantity {
            return Err(AppError::Conflict(format!(
                "Only {} slots available",
                item.available_slots
            )));
        }

        // The guarded stock update is the real check; concurrent buyers may both pass the
        // read above.
        if items.adjust_stock(item.id, params.quantity).await?.is_none() {
            return Err(AppError::Conflict(
                "Not enough slots available".to_string(),
            ));
        }

        let quantity = params.quantity;
        let order = MarketplaceOrderRepository::new(&txn)
            .create(&item, params)
            .await?;

        txn.commit().await?;

        tracing::info!(order_id = %order.id, item_id = %item.id, quantity, "Order placed");

        Ok(order)
    }

    pub async fn my_orders(
        &self,
        caller_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Order>, AppError> {
        Ok(MarketplaceOrderRepository::new(self.db)
            .find_by_buyer(caller_id, request)
            .await?)
    }

    /// Moves an order to a new status.
    ///
    /// Cancelling puts the ordered units back in stock.
    ///
    /// # Access Control
    /// - Buyer or seller of the order
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Transition not allowed for the caller
    pub async fn update_order_status(
        &self,
        caller_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let orders = MarketplaceOrderRepository::new(&txn);

        let order = orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;
        let actor = order.actor(caller_id).ok_or_else(|| {
            AppError::Forbidden("You are not a party to this order".to_string())
        })?;

        if !transition_allowed(order.status, status, actor) {
            return Err(AppError::Conflict(format!(
                "Cannot change order status from {:?} to {:?}",
                order.status, status
            )));
        }

        let updated = orders
            .transition(id, order.status, status)
            .await?
            .ok_or_else(|| AppError::Conflict("Order status changed concurrently".to_string()))?;
        if status == OrderStatus::Cancelled {
            MarketplaceItemRepository::new(&txn)
                .adjust_stock(order.item_id, -order.quantity)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict("Ordered units could not be returned to stock".to_string())
                })?;
        }

        txn.commit().await?;

        Ok(updated)
    }
}

/// Loads an item that has not been removed.
async fn listed_item<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Item, AppError> {
    MarketplaceItemRepository::new(db)
        .find_by_id(id)
        .await?
        .filter(|item| item.status != ItemStatus::Removed)
        .ok_or_else(|| AppError::not_found("Item"))
}

fn ensure_seller(item: &Item, caller_id: Uuid, message: &str) -> Result<(), AppError> {
    if item.user_id != caller_id {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}

use crate::{
    model::marketplace::{ItemSortField, SortOrder},
    server::{
        data::marketplace_item::MarketplaceItemRepository,
        model::marketplace::ItemFilter,
        util::pagination::PageRequest,
    },
};
use entity::marketplace_item::{ItemCategory, ItemStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod adjust_stock;
mod find_many;

/// Item service
///
/// Forwards reads, creates and searches to the configured [`ItemStore`]
/// unchanged. The only rule it adds is that a listing can be deleted by its
/// owner alone.

use std::sync::Arc;
use tracing::{debug, info};

use crate::models::item::{CreateItem, Item, ItemQuery};
use crate::store::{ItemStore, StoreError};

/// Error type for item operations
#[derive(Debug, thiserror::Error)]
pub enum ItemServiceError {
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Requester does not own the item
    #[error("Item {0} belongs to another user")]
    NotOwner(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ItemServiceResult<T> = Result<T, ItemServiceError>;

/// Item catalog operations
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// The underlying store, e.g. for seeding or health checks
    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    pub async fn get_all_items(&self) -> ItemServiceResult<Vec<Item>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_item_by_id(&self, id: &str) -> ItemServiceResult<Option<Item>> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn create_item(&self, data: CreateItem) -> ItemServiceResult<Item> {
        let item = self.store.create(data).await?;
        info!(item_id = %item.id, owner_id = %item.owner_id, "Item created");
        Ok(item)
    }

    pub async fn search_items(&self, query: &ItemQuery) -> ItemServiceResult<Vec<Item>> {
        let items = self.store.search(query).await?;
        debug!(?query, results = items.len(), "Item search");
        Ok(items)
    }

    /// Deletes an item owned by `requester_id`
    pub async fn delete_item(&self, id: &str, requester_id: &str) -> ItemServiceResult<()> {
        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ItemServiceError::NotFound(id.to_string()))?;

        if item.owner_id != requester_id {
            return Err(ItemServiceError::NotOwner(id.to_string()));
        }

        // Lost a race with another delete: same outcome for the caller.
        if !self.store.delete(id).await? {
            return Err(ItemServiceError::NotFound(id.to_string()));
        }

        info!(item_id = %id, owner_id = %requester_id, "Item deleted");
        Ok(())
    }
}

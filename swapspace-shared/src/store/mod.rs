/// Storage backends for items and users
///
/// The services talk to storage only through the [`ItemStore`] and
/// [`UserStore`] traits. Two implementations exist and are chosen once at
/// startup:
///
/// - [`memory`]: in-process collections guarded by `tokio::sync::RwLock`
/// - [`postgres`]: PostgreSQL tables via `sqlx`
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use swapspace_shared::models::item::CreateItem;
/// use swapspace_shared::store::{memory::MemoryItemStore, ItemStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
/// let item = store.create(CreateItem::default()).await?;
/// assert!(store.find_by_id(&item.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::item::{CreateItem, Item, ItemQuery};
use crate::models::user::{CreateUser, UpdateUser, User};

pub mod memory;
pub mod postgres;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique constraint violated (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Item persistence
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Backend name reported by the health endpoint
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// All items in insertion order
    async fn list(&self) -> StoreResult<Vec<Item>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Assigns an id and timestamps, normalizes the payload and stores it
    async fn create(&self, data: CreateItem) -> StoreResult<Item>;

    /// Items matching every filter of `query`, in list order
    async fn search(&self, query: &ItemQuery) -> StoreResult<Vec<Item>>;

    /// Removes an item, returning whether it existed
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Rewrites the denormalized owner name on all of one owner's items
    ///
    /// Returns the number of items touched.
    async fn update_owner_name(&self, owner_id: &str, owner_name: &str) -> StoreResult<u64>;
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in insertion order
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Case-insensitive email lookup
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Stores a new user
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if the email is already registered.
    async fn create(&self, data: CreateUser) -> StoreResult<User>;

    /// Applies profile changes, `None` if the user does not exist
    async fn update(&self, id: &str, data: UpdateUser) -> StoreResult<Option<User>>;
}

/// Generates a fresh record identifier
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

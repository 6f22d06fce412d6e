/// In-process stores
///
/// Records live in insertion-ordered vectors behind `tokio::sync::RwLock`.
/// Writers hold the lock across check-and-insert, so email uniqueness and id
/// uniqueness hold even under concurrent requests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::debug;

use super::{new_id, ItemStore, StoreError, StoreResult, UserStore};
use crate::models::item::{CreateItem, Item, ItemQuery};
use crate::models::user::{normalize_email, CreateUser, UpdateUser, User};

#[derive(Debug, Default)]
struct ItemTable {
    items: Vec<Item>,
    /// Every id ever issued, including deleted ones
    issued: HashSet<String>,
}

/// Item store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    table: RwLock<ItemTable>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.table.read().await.items.clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Item>> {
        let table = self.table.read().await;
        Ok(table.items.iter().find(|item| item.id == id).cloned())
    }

    async fn create(&self, data: CreateItem) -> StoreResult<Item> {
        let mut table = self.table.write().await;

        let mut id = new_id();
        while table.issued.contains(&id) {
            id = new_id();
        }

        let item = data.into_item(id);
        table.issued.insert(item.id.clone());
        table.items.push(item.clone());

        debug!(item_id = %item.id, total = table.items.len(), "Stored item in memory");
        Ok(item)
    }

    async fn search(&self, query: &ItemQuery) -> StoreResult<Vec<Item>> {
        let table = self.table.read().await;
        Ok(table
            .items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        let before = table.items.len();
        table.items.retain(|item| item.id != id);
        Ok(table.items.len() < before)
    }

    async fn update_owner_name(&self, owner_id: &str, owner_name: &str) -> StoreResult<u64> {
        let mut table = self.table.write().await;
        let now = Utc::now();
        let mut touched = 0;

        for item in table.items.iter_mut().filter(|item| item.owner_id == owner_id) {
            item.owner_name = owner_name.to_string();
            item.updated_at = now;
            touched += 1;
        }

        Ok(touched)
    }
}

/// User store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let email = normalize_email(&data.email);
        if users.iter().any(|user| user.email == email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }

        let mut id = new_id();
        while users.iter().any(|user| user.id == id) {
            id = new_id();
        }

        let user = data.into_user(id);
        users.push(user.clone());

        debug!(user_id = %user.id, "Stored user in memory");
        Ok(user)
    }

    async fn update(&self, id: &str, data: UpdateUser) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(location) = data.location {
            user.location = location;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

/// PostgreSQL stores
///
/// Tables are created by the migrations in `swapspace-shared/migrations`.
/// Email uniqueness is enforced by a unique index on `lower(email)`; unique
/// violations surface as [`StoreError::Conflict`].
///
/// # Example
///
/// ```no_run
/// use swapspace_shared::db::pool::{create_pool, DatabaseConfig};
/// use swapspace_shared::store::{postgres::PgItemStore, ItemStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: "postgresql://localhost:5432/swapspace".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// let items = PgItemStore::new(pool);
/// let all = items.list().await?;
/// println!("{} listings", all.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{new_id, ItemStore, StoreError, StoreResult, UserStore};
use crate::db::pool::health_check;
use crate::models::item::{CreateItem, Item, ItemQuery};
use crate::models::user::{normalize_email, CreateUser, UpdateUser, User};

const ITEM_COLUMNS: &str = "id, title, description, category, condition, image_url, location, \
                            owner_id, owner_name, created_at, updated_at";

const USER_COLUMNS: &str = "id, name, email, password_hash, location, created_at, updated_at";

/// Item store backed by the `items` table
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items ORDER BY created_at, id",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn create(&self, data: CreateItem) -> StoreResult<Item> {
        let insert = format!(
            r#"
            INSERT INTO items ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO NOTHING
            RETURNING {columns}
            "#,
            columns = ITEM_COLUMNS
        );

        loop {
            let candidate = data.clone().into_item(new_id());

            let stored = sqlx::query_as::<_, Item>(&insert)
                .bind(&candidate.id)
                .bind(&candidate.title)
                .bind(&candidate.description)
                .bind(&candidate.category)
                .bind(&candidate.condition)
                .bind(&candidate.image_url)
                .bind(&candidate.location)
                .bind(&candidate.owner_id)
                .bind(&candidate.owner_name)
                .bind(candidate.created_at)
                .bind(candidate.updated_at)
                .fetch_optional(&self.pool)
                .await?;

            match stored {
                Some(item) => return Ok(item),
                None => debug!(item_id = %candidate.id, "Item id collision, regenerating"),
            }
        }
    }

    async fn search(&self, query: &ItemQuery) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            r#"
            SELECT {}
            FROM items
            WHERE ($1::text IS NULL
                   OR strpos(lower(title), $1) > 0
                   OR strpos(lower(description), $1) > 0)
              AND ($2::text IS NULL OR replace(lower(trim(category)), ' ', '-') = $2)
              AND ($3::text IS NULL OR replace(lower(trim(condition)), ' ', '-') = $3)
              AND ($4::text IS NULL OR owner_id = $4)
            ORDER BY created_at, id
            "#,
            ITEM_COLUMNS
        ))
        .bind(query.text_needle())
        .bind(query.category_slug())
        .bind(query.condition_slug())
        .bind(query.owner_id.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_owner_name(&self, owner_id: &str, owner_name: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET owner_name = $2, updated_at = NOW()
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .bind(owner_name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// User store backed by the `users` table
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE lower(email) = $1",
            USER_COLUMNS
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let candidate = data.into_user(new_id());

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {columns}
            "#,
            columns = USER_COLUMNS
        ))
        .bind(&candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.password_hash)
        .bind(&candidate.location)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    async fn update(&self, id: &str, data: UpdateUser) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(data.name)
        .bind(data.location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict("Email already exists".to_string())
        }
        _ => StoreError::Database(err),
    }
}

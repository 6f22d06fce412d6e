/// Item model and listing helpers
///
/// An item is a barterable listing. Items are owned by whichever store is
/// active (in-memory or PostgreSQL); callers always receive clones.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id          TEXT PRIMARY KEY,
///     title       TEXT NOT NULL DEFAULT '',
///     description TEXT NOT NULL DEFAULT '',
///     category    TEXT NOT NULL DEFAULT '',
///     condition   TEXT NOT NULL DEFAULT '',
///     image_url   TEXT NOT NULL DEFAULT '',
///     location    TEXT NOT NULL DEFAULT '',
///     owner_id    TEXT NOT NULL DEFAULT '',
///     owner_name  TEXT NOT NULL DEFAULT '',
///     created_at  TIMESTAMPTZ NOT NULL,
///     updated_at  TIMESTAMPTZ NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```
/// use swapspace_shared::models::item::{CreateItem, ItemQuery};
///
/// let item = CreateItem {
///     title: Some("Lamp".to_string()),
///     category: Some("Furniture".to_string()),
///     condition: Some("Good".to_string()),
///     ..Default::default()
/// }
/// .into_item("item-1".to_string());
///
/// assert_eq!(item.title, "Lamp");
/// assert!(ItemQuery::default().matches(&item));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host prefix applied to bare image tokens
pub const IMAGE_HOST_PREFIX: &str = "https://images.unsplash.com/";

/// Item listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Random identifier assigned at creation, never reused
    pub id: String,

    pub title: String,

    pub description: String,

    /// Canonical category name, or empty when unset
    pub category: String,

    /// Canonical condition name, or empty when unset
    pub condition: String,

    /// Normalized image reference (URL or `data:` URI)
    pub image_url: String,

    pub location: String,

    /// Owner's user id. Not checked against the user store.
    pub owner_id: String,

    /// Denormalized copy of the owner's display name
    ///
    /// Refreshed by the auth service when the owner renames themself.
    pub owner_name: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Partial item payload accepted on creation
///
/// Every field is optional; missing text fields become empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
}

impl CreateItem {
    /// Builds the full record for a freshly generated identifier
    ///
    /// Fills defaults, stamps both timestamps with the same instant,
    /// canonicalizes known category/condition spellings and normalizes the
    /// image reference.
    pub fn into_item(self, id: String) -> Item {
        let now = Utc::now();

        let category = self.category.unwrap_or_default();
        let category = category
            .parse::<Category>()
            .map(|c| c.as_str().to_string())
            .unwrap_or(category);

        let condition = self.condition.unwrap_or_default();
        let condition = condition
            .parse::<Condition>()
            .map(|c| c.as_str().to_string())
            .unwrap_or(condition);

        Item {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category,
            condition,
            image_url: normalize_image_url(self.image_url.as_deref().unwrap_or_default()),
            location: self.location.unwrap_or_default(),
            owner_id: self.owner_id.unwrap_or_default(),
            owner_name: self.owner_name.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalizes an image reference
///
/// URLs with an `http`, `https` or `data` scheme are kept. Bare filename-like
/// tokens are rewritten onto [`IMAGE_HOST_PREFIX`]. Anything containing
/// whitespace is returned trimmed but otherwise untouched.
///
/// # Example
///
/// ```
/// use swapspace_shared::models::item::normalize_image_url;
///
/// assert_eq!(
///     normalize_image_url("photo-1618160702438-9b02ab6515c9"),
///     "https://images.unsplash.com/photo-1618160702438-9b02ab6515c9"
/// );
/// assert_eq!(normalize_image_url("https://example.com/a.png"), "https://example.com/a.png");
/// assert_eq!(normalize_image_url(""), "");
/// ```
pub fn normalize_image_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:") {
        return trimmed.to_string();
    }

    if trimmed.chars().any(char::is_whitespace) {
        return trimmed.to_string();
    }

    format!("{}{}", IMAGE_HOST_PREFIX, trimmed.trim_start_matches('/'))
}

/// Lowercases a label and replaces spaces with `-`
///
/// `"Home & Garden"` and `"home-&-garden"` share the slug `home-&-garden`.
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "-")
}

/// Error for labels outside the fixed category/condition sets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Electronics,
    Furniture,
    Clothing,
    Books,
    Sports,
    HomeAndGarden,
    ToysAndGames,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Furniture,
        Category::Clothing,
        Category::Books,
        Category::Sports,
        Category::HomeAndGarden,
        Category::ToysAndGames,
        Category::Other,
    ];

    /// Display name, as stored on items
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::HomeAndGarden => "Home & Garden",
            Category::ToysAndGames => "Toys & Games",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = slugify(s);
        Category::ALL
            .into_iter()
            .find(|c| slugify(c.as_str()) == slug)
            .ok_or_else(|| UnknownLabel {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Physical condition of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = slugify(s);
        Condition::ALL
            .into_iter()
            .find(|c| slugify(c.as_str()) == slug)
            .ok_or_else(|| UnknownLabel {
                kind: "condition",
                value: s.to_string(),
            })
    }
}

/// Search filters over the item store
///
/// Filters compose with logical AND. Empty values and the `all` /
/// `all-categories` / `all-conditions` sentinels are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    /// Free text matched against title and description
    #[serde(default, rename = "q")]
    pub text: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub condition: String,

    /// Restrict to one owner's listings
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl ItemQuery {
    /// Lowercased free-text needle, `None` when the query is empty
    pub fn text_needle(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_lowercase())
    }

    /// Category slug to match, `None` for wildcards
    pub fn category_slug(&self) -> Option<String> {
        filter_slug(&self.category)
    }

    /// Condition slug to match, `None` for wildcards
    pub fn condition_slug(&self) -> Option<String> {
        filter_slug(&self.condition)
    }

    /// Returns true when `item` satisfies every filter
    pub fn matches(&self, item: &Item) -> bool {
        let text_ok = match self.text_needle() {
            None => true,
            Some(needle) => {
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            }
        };

        let category_ok = self
            .category_slug()
            .map_or(true, |slug| slugify(&item.category) == slug);

        let condition_ok = self
            .condition_slug()
            .map_or(true, |slug| slugify(&item.condition) == slug);

        let owner_ok = self
            .owner_id
            .as_deref()
            .map_or(true, |owner| item.owner_id == owner);

        text_ok && category_ok && condition_ok && owner_ok
    }
}

fn filter_slug(value: &str) -> Option<String> {
    let slug = slugify(value);
    if slug.is_empty() || slug == "all" || slug.starts_with("all-") {
        None
    } else {
        Some(slug)
    }
}

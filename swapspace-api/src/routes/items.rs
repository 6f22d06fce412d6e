/// Item endpoints
///
/// # Endpoints
///
/// - `GET /api/items` - All items, or a search when `q`, `category`,
///   `condition` or `ownerId` is given
/// - `GET /api/items/:id` - One item
/// - `POST /api/items` - Create an item (session optional)
/// - `DELETE /api/items/:id` - Delete an owned item (session required)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use swapspace_shared::{
    auth::middleware::AuthContext,
    models::item::{Category, Condition, CreateItem, Item, ItemQuery},
};
use validator::{Validate, ValidationError};

/// Create item request
///
/// Every field is optional; unset text fields become empty strings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_condition"))]
    pub condition: Option<String>,

    pub image_url: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    /// Ignored when the request carries a session
    pub owner_id: Option<String>,

    /// Ignored when the request carries a session
    pub owner_name: Option<String>,
}

impl From<CreateItemRequest> for CreateItem {
    fn from(req: CreateItemRequest) -> Self {
        CreateItem {
            title: req.title,
            description: req.description,
            category: req.category,
            condition: req.condition,
            image_url: req.image_url,
            location: req.location,
            owner_id: req.owner_id,
            owner_name: req.owner_name,
        }
    }
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<Category>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("category");
    err.message = Some("Unknown category".into());
    Err(err)
}

fn validate_condition(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<Condition>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("condition");
    err.message = Some("Unknown condition".into());
    Err(err)
}

/// Lists or searches items
///
/// ```text
/// GET /api/items?q=lamp&category=all-categories&condition=good
/// ```
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = if query == ItemQuery::default() {
        state.items.get_all_items().await?
    } else {
        state.items.search_items(&query).await?
    };

    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    state
        .items
        .get_item_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))
}

/// Creates an item
///
/// With a session the owner fields are taken from the session user.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: A token was sent but is not valid
pub async fn create_item(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    ApiJson(req): ApiJson<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    req.validate()?;

    let mut data = CreateItem::from(req);
    if let Some(Extension(auth)) = auth {
        let owner = state.auth.get_user(&auth.user_id).await?;
        data.owner_id = Some(owner.id);
        data.owner_name = Some(owner.name);
    }

    let item = state.items.create_item(data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Deletes an item owned by the session user
///
/// # Errors
///
/// - `403 Forbidden`: Item belongs to someone else
/// - `404 Not Found`: No such item
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.items.delete_item(&id, &auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

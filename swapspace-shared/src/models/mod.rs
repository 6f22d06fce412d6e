/// Data models for SwapSpace
///
/// # Models
///
/// - `item`: Barterable listings, category/condition sets and search filters
/// - `user`: User accounts and their public view
///
/// # Example
///
/// ```
/// use swapspace_shared::models::item::CreateItem;
///
/// let item = CreateItem {
///     title: Some("Mountain Bike".to_string()),
///     ..Default::default()
/// }
/// .into_item("1".to_string());
///
/// assert_eq!(item.description, "");
/// ```

pub mod item;
pub mod user;

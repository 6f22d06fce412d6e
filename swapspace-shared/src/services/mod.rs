/// Business services used by the HTTP layer
///
/// - `items`: item catalog (list, get, create, search, delete)
/// - `auth`: registration, login, session verification and profile edits

pub mod auth;
pub mod items;

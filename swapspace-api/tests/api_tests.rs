/// HTTP API tests for SwapSpace
///
/// These drive the full router (middleware included) over in-memory stores:
/// - Item listing, creation, search and deletion
/// - Account creation, login and sessions
/// - Profile edits and owner name refresh
/// - Error bodies and status codes

mod common;

use axum::http::StatusCode;
use common::{TestContext, TEST_PASSWORD};
use serde_json::json;
use std::collections::HashSet;
use swapspace_shared::store::ItemStore;

#[tokio::test]
async fn test_root_banner_and_health() {
    let ctx = TestContext::new();

    let (status, headers, body) = ctx.send_raw("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "API running!");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");

    let (status, body) = ctx.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["store"], "connected");
}

#[tokio::test]
async fn test_create_then_get_item() {
    let ctx = TestContext::new();

    let created = ctx
        .create_item(
            json!({ "title": "Lamp", "category": "Furniture", "condition": "Good" }),
            None,
        )
        .await;
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let (status, item) = ctx.send("GET", &format!("/api/items/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["title"], "Lamp");
    assert_eq!(item["category"], "Furniture");
    assert_eq!(item["condition"], "Good");
    assert_eq!(item["description"], "");
    assert!(item["createdAt"].is_string());
    assert_eq!(item["createdAt"], item["updatedAt"]);
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let ctx = TestContext::new();

    let mut ids = HashSet::new();
    for i in 0..20 {
        let item = ctx.create_item(json!({ "title": format!("Item {}", i) }), None).await;
        assert!(ids.insert(item["id"].as_str().unwrap().to_string()));
    }

    let (_, items) = ctx.send("GET", "/api/items", None, None).await;
    assert_eq!(items.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_missing_item_is_404() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/api/items/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn test_image_url_is_normalized() {
    let ctx = TestContext::new();

    let item = ctx
        .create_item(json!({ "title": "Camera", "imageUrl": "/photo-123" }), None)
        .await;
    assert_eq!(item["imageUrl"], "https://images.unsplash.com/photo-123");

    let item = ctx
        .create_item(
            json!({ "title": "Sketch", "imageUrl": "data:image/png;base64,AAAA" }),
            None,
        )
        .await;
    assert_eq!(item["imageUrl"], "data:image/png;base64,AAAA");
}

#[tokio::test]
async fn test_invalid_item_payload_is_400() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/items",
            Some(json!({ "title": "Car", "category": "Vehicles" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "category");

    let (_, items) = ctx.send("GET", "/api/items", None, None).await;
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_filters() {
    let ctx = TestContext::new();

    ctx.create_item(
        json!({
            "title": "Vintage Record Player",
            "description": "Plays 33 and 45 RPM",
            "category": "Electronics",
            "condition": "Good",
            "ownerId": "user1"
        }),
        None,
    )
    .await;
    ctx.create_item(
        json!({
            "title": "Gardening Tools Set",
            "description": "Shovel, rake and a well-loved trowel",
            "category": "Home & Garden",
            "condition": "Like New",
            "ownerId": "user2"
        }),
        None,
    )
    .await;

    // Wildcards return everything
    let (_, all) = ctx
        .send(
            "GET",
            "/api/items?q=&category=all-categories&condition=all-conditions",
            None,
            None,
        )
        .await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    // Text found only in one description
    let (_, found) = ctx.send("GET", "/api/items?q=TROWEL", None, None).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Gardening Tools Set");

    // Slug filters
    let (_, found) = ctx
        .send(
            "GET",
            "/api/items?category=home-%26-garden&condition=like-new",
            None,
            None,
        )
        .await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, found) = ctx.send("GET", "/api/items?condition=poor", None, None).await;
    assert!(found.as_array().unwrap().is_empty());

    // Owner filter
    let (_, found) = ctx.send("GET", "/api/items?ownerId=user1", None, None).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["ownerId"], "user1");
}

#[tokio::test]
async fn test_duplicate_user_email_is_409() {
    let ctx = TestContext::new();
    let payload = json!({
        "name": "A",
        "email": "a@b.com",
        "password": TEST_PASSWORD,
        "location": "Austin, TX"
    });

    let (status, first) = ctx.send("POST", "/api/users", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(first.get("password").is_none());
    assert!(first.get("passwordHash").is_none());

    let (status, body) = ctx.send("POST", "/api/users", Some(payload), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    // First record is unchanged
    let (_, users) = ctx.send("GET", "/api/users?email=A@B.com", None, None).await;
    assert_eq!(users.as_array().unwrap(), &vec![first]);
}

#[tokio::test]
async fn test_invalid_registration_is_400() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/register",
            Some(json!({ "name": "A", "email": "nope", "password": "short" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[tokio::test]
async fn test_login() {
    let ctx = TestContext::new();
    let user = ctx.register("Alex Johnson", "alex@example.com").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/login",
            Some(json!({ "email": "alex@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = ctx
        .send(
            "POST",
            "/api/login",
            Some(json!({ "email": "nobody@example.com", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let login = json!({ "email": "ALEX@example.com", "password": TEST_PASSWORD });
    let (status, first) = ctx.send("POST", "/api/login", Some(login.clone()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["user"]["id"], user.id.as_str());
    assert!(first["user"].get("password").is_none());

    let (_, second) = ctx.send("POST", "/api/login", Some(login), None).await;
    assert_ne!(first["token"], second["token"]);
    assert_ne!(first["token"].as_str().unwrap(), user.token);
}

#[tokio::test]
async fn test_session_endpoint() {
    let ctx = TestContext::new();
    let user = ctx.register("Alex Johnson", "alex@example.com").await;

    let (status, body) = ctx
        .send("GET", "/api/session", None, Some(&user.auth_header()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.as_str());
    assert_eq!(body["email"], "alex@example.com");

    let (status, _) = ctx.send("GET", "/api/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .send("GET", "/api/session", None, Some("Bearer not-a-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_owns_created_items() {
    let ctx = TestContext::new();
    let user = ctx.register("Alex Johnson", "alex@example.com").await;

    let item = ctx
        .create_item(
            json!({ "title": "Lamp", "ownerId": "someone-else", "ownerName": "Mallory" }),
            Some(&user.auth_header()),
        )
        .await;
    assert_eq!(item["ownerId"], user.id.as_str());
    assert_eq!(item["ownerName"], "Alex Johnson");

    // A bad token is rejected rather than ignored
    let (status, _) = ctx
        .send(
            "POST",
            "/api/items",
            Some(json!({ "title": "Lamp" })),
            Some("Bearer forged"),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_item_requires_owner() {
    let ctx = TestContext::new();
    let owner = ctx.register("Alex Johnson", "alex@example.com").await;
    let other = ctx.register("Jamie Smith", "jamie@example.com").await;

    let item = ctx
        .create_item(json!({ "title": "Lamp" }), Some(&owner.auth_header()))
        .await;
    let uri = format!("/api/items/{}", item["id"].as_str().unwrap());

    let (status, _) = ctx.send("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = ctx.send("DELETE", &uri, None, Some(&other.auth_header())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = ctx.send("DELETE", &uri, None, Some(&owner.auth_header())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = ctx.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("DELETE", &uri, None, Some(&owner.auth_header())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_rename_refreshes_owner_name() {
    let ctx = TestContext::new();
    let user = ctx.register("Alex Johnson", "alex@example.com").await;
    let other = ctx.register("Jamie Smith", "jamie@example.com").await;

    let item = ctx
        .create_item(json!({ "title": "Lamp" }), Some(&user.auth_header()))
        .await;

    let uri = format!("/api/users/{}", user.id);
    let (status, _) = ctx
        .send(
            "PUT",
            &uri,
            Some(json!({ "name": "Hijacked" })),
            Some(&other.auth_header()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = ctx
        .send(
            "PUT",
            &uri,
            Some(json!({ "name": "Alex J.", "location": "Seattle, WA" })),
            Some(&user.auth_header()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Alex J.");
    assert_eq!(updated["location"], "Seattle, WA");

    let stored = ctx
        .items
        .find_by_id(item["id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.owner_name, "Alex J.");
}

#[tokio::test]
async fn test_list_users_hides_passwords() {
    let ctx = TestContext::new();
    ctx.register("Alex Johnson", "alex@example.com").await;
    ctx.register("Jamie Smith", "jamie@example.com").await;

    let (status, users) = ctx.send("GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
    }

    let (_, filtered) = ctx
        .send("GET", "/api/users?email=jamie@example.com", None, None)
        .await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["name"], "Jamie Smith");
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/users",
            Some(json!({ "name": "Alex Johnson", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("email"));

    let (status, body) = ctx
        .send("POST", "/api/items", Some(json!({ "title": 5 })), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    // No body and no content type
    let (status, body) = ctx.send("POST", "/api/login", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    assert!(ctx.items.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_unknown_email_is_401() {
    let ctx = TestContext::new();
    ctx.register("Alex Johnson", "alex@example.com").await;

    for email in ["nope", "nobody@example.com"] {
        let (status, body) = ctx
            .send(
                "POST",
                "/api/login",
                Some(json!({ "email": email, "password": "x" })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "email {}", email);
        assert_eq!(body["error"], "unauthorized");
    }
}

#[tokio::test]
async fn test_empty_profile_update_leaves_user_unchanged() {
    let ctx = TestContext::new();
    let user = ctx.register("Alex Johnson", "alex@example.com").await;

    let (_, before) = ctx
        .send("GET", "/api/session", None, Some(&user.auth_header()))
        .await;

    let (status, after) = ctx
        .send(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(json!({})),
            Some(&user.auth_header()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

/// End-to-end tests for the kanban HTTP API
///
/// Run with: DATABASE_URL=postgres://... cargo test -p kanban-api --test integration_test

mod common;

use axum::http::{Method, StatusCode};
use common::{TestContext, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let Some(ctx) = TestContext::new().await else { return };

    let (status, body) = ctx.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_register_login_and_me() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("alice").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": alice.email, "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], alice.id);
    assert!(body["user"].get("password_hash").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = ctx.send(Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], alice.email);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("bad-login").await;

    let (status, wrong_password) = ctx
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": alice.email, "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_email) = ctx
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": common::unique_email("ghost"), "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown_email["message"]);
}

#[tokio::test]
async fn test_register_rejections() {
    let Some(ctx) = TestContext::new().await else { return };

    let (status, body) = ctx
        .send(
            Method::POST,
            "/api/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "12" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let alice = ctx.register("dup").await;
    let (status, _) = ctx
        .send(
            Method::POST,
            "/api/register",
            None,
            Some(json!({ "email": alice.email.to_uppercase(), "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let Some(ctx) = TestContext::new().await else { return };

    let (status, _) = ctx.send(Method::GET, "/api/boards", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .send(Method::GET, "/api/me", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_new_board_has_default_lists() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("defaults").await;

    let (status, board) = ctx.post("/api/boards", &alice, json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(board["title"], "My Board");
    assert_eq!(board["user_id"], alice.id);

    let (status, detail) = ctx
        .get(&format!("/api/boards/{}", board["id"]), &alice)
        .await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = detail["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Ideas", "In Progress", "Review", "Done"]);
}

/// Owner creates a board, invites a member, the member adds a card, and an
/// outsider is locked out.
#[tokio::test]
async fn test_shared_board_flow() {
    let Some(ctx) = TestContext::new().await else { return };

    let owner = ctx.register("owner").await;
    let member = ctx.register("member").await;
    let outsider = ctx.register("outsider").await;

    let board_id = ctx.create_board(&owner, "Sprint").await;

    let (status, invited) = ctx
        .post(
            &format!("/api/boards/{}/members", board_id),
            &owner,
            json!({ "email": member.email }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invited["user_id"], member.id);
    assert_eq!(invited["role"], "member");

    // Member sees the board and its first list
    let (status, boards) = ctx.get("/api/boards", &member).await;
    assert_eq!(status, StatusCode::OK);
    assert!(boards
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == board_id));

    let (_, detail) = ctx.get(&format!("/api/boards/{}", board_id), &member).await;
    let ideas_id = detail["lists"][0]["id"].as_i64().unwrap();

    let (status, card) = ctx
        .post(
            &format!("/api/lists/{}/cards", ideas_id),
            &member,
            json!({ "title": "  Write tests  ", "color": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(card["title"], "Write tests");
    assert_eq!(card["position"], 0);

    // The board view normalizes the blank color from the list title
    let (_, detail) = ctx.get(&format!("/api/boards/{}", board_id), &owner).await;
    let shown = &detail["lists"][0]["cards"][0];
    assert_eq!(shown["id"], card["id"]);
    assert_eq!(shown["color"], "accent");

    // Outsider is shut out everywhere
    let (status, _) = ctx.get(&format!("/api/boards/{}", board_id), &outsider).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = ctx
        .get(&format!("/api/cards/{}", card["id"]), &outsider)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Members can't administer the board
    let (status, _) = ctx
        .post(
            &format!("/api/boards/{}/members", board_id),
            &member,
            json!({ "email": outsider.email }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = ctx
        .patch(&format!("/api/boards/{}", board_id), &member, json!({ "title": "Mine" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner removes the member, who then loses access
    let (status, _) = ctx
        .delete(&format!("/api/boards/{}/members/{}", board_id, member.id), &owner)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.get(&format!("/api/boards/{}", board_id), &member).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invite_errors() {
    let Some(ctx) = TestContext::new().await else { return };

    let owner = ctx.register("inviter").await;
    let member = ctx.register("invitee").await;
    let board_id = ctx.create_board(&owner, "Invites").await;
    let uri = format!("/api/boards/{}/members", board_id);

    let (status, _) = ctx
        .post(&uri, &owner, json!({ "email": common::unique_email("nobody") }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.post(&uri, &owner, json!({ "email": owner.email })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.post(&uri, &owner, json!({ "email": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.post(&uri, &owner, json!({ "email": member.email })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = ctx.post(&uri, &owner, json!({ "email": member.email })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The owner can never be removed
    let (status, _) = ctx
        .delete(&format!("{}/{}", uri, owner.id), &owner)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, members) = ctx.get(&uri, &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_card_edit_move_and_satellites() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("cards").await;
    let bob = ctx.register("assignee").await;
    let board_id = ctx.create_board(&alice, "Cards").await;

    ctx.post(
        &format!("/api/boards/{}/members", board_id),
        &alice,
        json!({ "email": bob.email }),
    )
    .await;

    let (_, detail) = ctx.get(&format!("/api/boards/{}", board_id), &alice).await;
    let first_list = detail["lists"][0]["id"].as_i64().unwrap();
    let last_list = detail["lists"][3]["id"].as_i64().unwrap();

    let (_, card) = ctx
        .post(
            &format!("/api/lists/{}/cards", first_list),
            &alice,
            json!({ "title": "Ship it", "badge": "v1" }),
        )
        .await;
    let card_uri = format!("/api/cards/{}", card["id"]);

    // Blank title is ignored, due date set then cleared with null
    let (status, updated) = ctx
        .patch(
            &card_uri,
            &alice,
            json!({ "title": "  ", "description": "details", "due_date": "2030-01-01T00:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Ship it");
    assert_eq!(updated["description"], "details");
    assert!(updated["due_date"].is_string());

    let (_, updated) = ctx.patch(&card_uri, &alice, json!({ "due_date": null })).await;
    assert!(updated["due_date"].is_null());

    // Move to the last list
    let (status, moved) = ctx
        .patch(&card_uri, &alice, json!({ "list_id": last_list, "position": 0 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["list_id"], last_list);

    // Unknown target list is a bad request
    let (status, _) = ctx
        .patch(&card_uri, &alice, json!({ "list_id": i64::MAX }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Tags upsert by name
    let tags_uri = format!("{}/tags", card_uri);
    let (status, tag) = ctx
        .post(&tags_uri, &alice, json!({ "name": "bug", "color": "warning" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, again) = ctx
        .post(&tags_uri, &alice, json!({ "name": "bug", "color": "success" }))
        .await;
    assert_eq!(again["id"], tag["id"]);
    assert_eq!(again["color"], "success");

    // Comments, oldest first
    let comments_uri = format!("{}/comments", card_uri);
    let (status, _) = ctx
        .post(&comments_uri, &alice, json!({ "content": "first" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    ctx.post(&comments_uri, &bob, json!({ "content": "second" }))
        .await;
    let (status, _) = ctx.post(&comments_uri, &alice, json!({ "content": " " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, comments) = ctx.get(&comments_uri, &alice).await;
    let contents: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["first", "second"]);
    assert_eq!(comments[1]["user_email"], bob.email);

    // Assignment
    let members_uri = format!("{}/members", card_uri);
    let (status, members) = ctx
        .post(&members_uri, &alice, json!({ "user_id": bob.id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members[0]["user_id"], bob.id);

    // Detail view joins everything
    let (status, full) = ctx.get(&card_uri, &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["tags"].as_array().unwrap().len(), 1);
    assert_eq!(full["members"].as_array().unwrap().len(), 1);
    assert_eq!(full["comments"].as_array().unwrap().len(), 2);

    let (status, _) = ctx
        .delete(&format!("{}/{}", members_uri, bob.id), &alice)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx
        .delete(&format!("{}/{}", members_uri, bob.id), &alice)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .delete(&format!("{}/{}", tags_uri, tag["id"]), &alice)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Activity, newest first
    let (status, activity) = ctx.get(&format!("{}/activity", card_uri), &alice).await;
    assert_eq!(status, StatusCode::OK);
    let activity = activity.as_array().unwrap();
    assert_eq!(activity.first().unwrap()["action_type"], "tag_removed");
    assert_eq!(activity.last().unwrap()["action_type"], "card_created");

    let (status, _) = ctx.delete(&card_uri, &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.get(&card_uri, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_lifecycle() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("lists").await;
    let board_id = ctx.create_board(&alice, "Lists").await;
    let lists_uri = format!("/api/boards/{}/lists", board_id);

    let (status, _) = ctx.post(&lists_uri, &alice, json!({ "title": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = ctx
        .post(&lists_uri, &alice, json!({ "title": "Backlog" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list["position"], 4);
    assert_eq!(list["accent"], "primary");

    let list_uri = format!("/api/lists/{}", list["id"]);
    let (status, renamed) = ctx
        .patch(&list_uri, &alice, json!({ "title": "Icebox", "accent": "" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["title"], "Icebox");
    assert_eq!(renamed["accent"], "primary");

    let (status, _) = ctx.delete(&list_uri, &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, lists) = ctx.get(&lists_uri, &alice).await;
    assert_eq!(lists.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_user_search() {
    let Some(ctx) = TestContext::new().await else { return };

    let tag = uuid::Uuid::new_v4().simple().to_string()[..12].to_string();
    let caller = ctx.register(&format!("searcher-{}", tag)).await;
    let other = ctx.register(&format!("found-{}", tag)).await;

    let (status, results) = ctx
        .get(&format!("/api/users/search?q={}", tag), &caller)
        .await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![other.id]);

    let (_, results) = ctx.get("/api/users/search?q=a", &caller).await;
    assert!(results.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_board() {
    let Some(ctx) = TestContext::new().await else { return };

    let alice = ctx.register("delete-board").await;
    let board_id = ctx.create_board(&alice, "Doomed").await;

    let (status, _) = ctx.delete(&format!("/api/boards/{}", board_id), &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.get(&format!("/api/boards/{}", board_id), &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

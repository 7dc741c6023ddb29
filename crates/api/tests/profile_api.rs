//! HTTP-level tests for the profile pages and file uploads.

mod common;

use axum::http::StatusCode;
use common::{
    assert_see_other, body_bytes, body_json, create_plant, get, post_form, post_multipart,
    sign_up, spawn_app, TestApp, PUBLIC_BASE_URL,
};
use plantpal_core::profile::{DEFAULT_BIO, MAX_FULL_NAME_LENGTH};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

async fn user_id(app: &TestApp, email: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

/// Path component of a public storage URL.
fn storage_path(url: &str) -> &str {
    url.strip_prefix(PUBLIC_BASE_URL)
        .expect("URL should use the public base")
}

// ---------------------------------------------------------------------------
// Profile page / edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_profile_uses_display_defaults() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;

    let json = body_json(get(&app.app, "/dashboard/profile", Some(&cookie)).await).await;
    let data = &json["data"];
    assert_eq!(data["display_name"], "ana");
    assert_eq!(data["email"], "ana@example.com");
    assert_eq!(data["bio"], DEFAULT_BIO);
    assert_eq!(data["avatar_url"], "");
    assert_eq!(data["stats"]["plants"], 0);
    assert_eq!(data["stats"]["waterings"], 0);
    assert_eq!(data["stats"]["fertilizings"], 0);
}

#[tokio::test]
async fn stats_count_plants_and_completed_care() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;
    let id = create_plant(&app, &cookie, "Calathea").await;
    let uri = format!("/dashboard/plants/{id}/add-task");
    post_form(&app.app, &uri, "task_type=water", Some(&cookie)).await;
    post_form(&app.app, &uri, "task_type=water", Some(&cookie)).await;
    post_form(&app.app, &uri, "task_type=fertilize", Some(&cookie)).await;
    post_form(&app.app, &uri, "task_type=prune", Some(&cookie)).await;

    let json = body_json(get(&app.app, "/dashboard/profile", Some(&cookie)).await).await;
    let stats = &json["data"]["stats"];
    assert_eq!(stats["plants"], 1);
    assert_eq!(stats["waterings"], 2);
    assert_eq!(stats["fertilizings"], 1);
}

#[tokio::test]
async fn editing_profile_updates_page_and_nav() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;

    let response = post_form(
        &app.app,
        "/dashboard/profile/edit",
        "full_name=Ana+Fern&bio=Collector+of+aroids",
        Some(&cookie),
    )
    .await;
    assert_eq!(assert_see_other(&response), "/dashboard/profile");

    let json = body_json(get(&app.app, "/dashboard/profile", Some(&cookie)).await).await;
    assert_eq!(json["data"]["display_name"], "Ana Fern");
    assert_eq!(json["data"]["bio"], "Collector of aroids");
    assert_eq!(json["nav"]["display_name"], "Ana Fern");

    let form = body_json(get(&app.app, "/dashboard/profile/edit", Some(&cookie)).await).await;
    assert_eq!(form["data"]["full_name"], "Ana Fern");
    assert_eq!(form["data"]["bio"], "Collector of aroids");
}

#[tokio::test]
async fn blank_fields_restore_defaults() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;
    post_form(
        &app.app,
        "/dashboard/profile/edit",
        "full_name=Ana&bio=Hi",
        Some(&cookie),
    )
    .await;

    post_form(
        &app.app,
        "/dashboard/profile/edit",
        "full_name=&bio=+",
        Some(&cookie),
    )
    .await;

    let json = body_json(get(&app.app, "/dashboard/profile", Some(&cookie)).await).await;
    assert_eq!(json["data"]["display_name"], "ana");
    assert_eq!(json["data"]["bio"], DEFAULT_BIO);
}

#[tokio::test]
async fn overlong_name_rejected() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;
    let name = "a".repeat(MAX_FULL_NAME_LENGTH + 1);

    let response = post_form(
        &app.app,
        "/dashboard/profile/edit",
        &format!("full_name={name}"),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(&app.app, "/dashboard/profile", Some(&cookie)).await).await;
    assert_eq!(json["data"]["display_name"], "ana");
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn avatar_upload_stores_file_and_updates_profile() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;
    let uid = user_id(&app, "ana@example.com").await;

    let response = post_multipart(
        &app.app,
        "/dashboard/profile/avatar",
        &[("file", "me.PNG", PNG_BYTES)],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();

    let prefix = format!("{PUBLIC_BASE_URL}/storage/avatars/{uid}/avatar-");
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    let stored: Option<String> = sqlx::query_scalar("SELECT avatar_url FROM users WHERE id = $1")
        .bind(uid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(stored.as_deref(), Some(url.as_str()));

    let on_disk = app
        .storage_path()
        .join(storage_path(&url).trim_start_matches("/storage/"));
    assert_eq!(std::fs::read(on_disk).unwrap(), PNG_BYTES);

    let json = body_json(get(&app.app, "/dashboard", Some(&cookie)).await).await;
    assert_eq!(json["nav"]["avatar_url"], url.as_str());
}

#[tokio::test]
async fn plant_image_upload_is_served() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;
    let uid = user_id(&app, "ana@example.com").await;

    let response = post_multipart(
        &app.app,
        "/dashboard/uploads/plant-image",
        &[("file", "fern.jpg", PNG_BYTES)],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let url = body_json(response).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with(&format!("{PUBLIC_BASE_URL}/storage/plants/{uid}/plants/")));
    assert!(url.ends_with(".jpg"));

    let served = get(&app.app, storage_path(&url), None).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, PNG_BYTES);
}

#[tokio::test]
async fn uploads_get_distinct_names() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;

    let mut urls = Vec::new();
    for _ in 0..2 {
        let response = post_multipart(
            &app.app,
            "/dashboard/uploads/plant-image",
            &[("file", "fern.jpg", PNG_BYTES)],
            Some(&cookie),
        )
        .await;
        urls.push(body_json(response).await["data"]["url"].clone());
    }
    assert_ne!(urls[0], urls[1]);
}

#[tokio::test]
async fn only_first_file_is_stored() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;

    let response = post_multipart(
        &app.app,
        "/dashboard/uploads/plant-image",
        &[
            ("file", "first.png", b"first".as_slice()),
            ("file", "second.gif", b"second".as_slice()),
        ],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let url = body_json(response).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.ends_with(".png"));

    let served = get(&app.app, storage_path(&url), None).await;
    assert_eq!(body_bytes(served).await, b"first");
}

#[tokio::test]
async fn upload_without_file_part_rejected() {
    let app = spawn_app().await;
    let cookie = sign_up(&app.app, "ana@example.com").await;

    let response = post_multipart(
        &app.app,
        "/dashboard/uploads/plant-image",
        &[("attachment", "fern.jpg", PNG_BYTES)],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_session() {
    let app = spawn_app().await;

    let response = post_multipart(
        &app.app,
        "/dashboard/uploads/plant-image",
        &[("file", "fern.jpg", PNG_BYTES)],
        None,
    )
    .await;
    assert_eq!(assert_see_other(&response), "/sign-in");
}

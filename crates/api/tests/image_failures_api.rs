//! Failure paths of the row-plus-image flows.
//!
//! Database failures are forced with `BEFORE UPDATE` triggers installed by
//! the test itself. Every test checks which files are left on disk.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, get, send_multipart, stored_files, MultipartBody};
use sqlx::PgPool;

/// Make matching `UPDATE`s on `table` raise an error.
async fn reject_updates(pool: &PgPool, table: &str, when: &str) {
    sqlx::query(
        "CREATE FUNCTION reject_update() RETURNS trigger AS $$
         BEGIN
             RAISE EXCEPTION 'update rejected';
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(pool)
    .await
    .unwrap();
    let trigger = format!(
        "CREATE TRIGGER trg_{table}_reject BEFORE UPDATE ON {table}
         FOR EACH ROW WHEN ({when}) EXECUTE FUNCTION reject_update()"
    );
    sqlx::query(&trigger).execute(pool).await.unwrap();
}

/// Make every `UPDATE` on `table` affect zero rows, as if the row had been
/// deleted concurrently.
async fn skip_updates(pool: &PgPool, table: &str) {
    sqlx::query(
        "CREATE FUNCTION skip_update() RETURNS trigger AS $$
         BEGIN
             RETURN NULL;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(pool)
    .await
    .unwrap();
    let trigger = format!(
        "CREATE TRIGGER trg_{table}_skip BEFORE UPDATE ON {table}
         FOR EACH ROW EXECUTE FUNCTION skip_update()"
    );
    sqlx::query(&trigger).execute(pool).await.unwrap();
}

fn client_form(name: &str) -> MultipartBody {
    MultipartBody::new().text("name", name).text("area", "Dhaka")
}

/// Create a client with a PNG image and return `(id, image_link)`.
async fn seed_client(app: &axum::Router, token: &str, name: &str) -> (i64, String) {
    let form = client_form(name).file("profileImage", "logo.png", common::PNG);
    let response = send_multipart(app.clone(), Method::POST, "/api/v1/clients", Some(token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["image_link"].as_str().unwrap().to_string(),
    )
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_link_update_discards_new_file_and_row(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    reject_updates(&pool, "clients", "true").await;

    let form = client_form("Doomed").file("profileImage", "logo.png", common::PNG);
    let response = send_multipart(app.clone(), Method::POST, "/api/v1/clients", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let listed = body_json(get(app, "/api/v1/clients").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
    assert!(stored_files(dir.path(), "clients").is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_file_write_rolls_back_row(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    std::fs::remove_dir(dir.path().join("clients")).unwrap();

    let form = client_form("Homeless").file("profileImage", "logo.png", common::PNG);
    let response = send_multipart(app.clone(), Method::POST, "/api/v1/clients", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let listed = body_json(get(app, "/api/v1/clients").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
    assert!(!dir.path().join("clients").exists());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_row_update_restores_previous_image(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    let (id, original) = seed_client(&app, &token, "Acme").await;
    reject_updates(&pool, "clients", "true").await;

    let uri = format!("/api/v1/clients/{id}");
    let form = MultipartBody::new()
        .text("name", "Renamed")
        .file("profileImage", "new.jpg", common::JPEG);
    let response = send_multipart(app.clone(), Method::PUT, &uri, Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(stored_files(dir.path(), "clients"), vec![original.clone()]);
    let bytes = std::fs::read(dir.path().join("clients").join(&original)).unwrap();
    assert_eq!(bytes, common::PNG);

    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["data"]["name"], "Acme");
    assert_eq!(json["data"]["image_link"], original.as_str());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vanished_row_restores_previous_image(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    let (id, original) = seed_client(&app, &token, "Acme").await;
    skip_updates(&pool, "clients").await;

    // Same display name, so the new file reuses the old file's name.
    let uri = format!("/api/v1/clients/{id}");
    let form = MultipartBody::new().file("profileImage", "same.png", common::JPEG);
    let response = send_multipart(app, Method::PUT, &uri, Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(stored_files(dir.path(), "clients"), vec![original.clone()]);
    let bytes = std::fs::read(dir.path().join("clients").join(&original)).unwrap();
    assert_eq!(bytes, common::PNG);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rename_to_backup_like_name_keeps_new_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    let (id, _) = seed_client(&app, &token, "Old").await;

    let uri = format!("/api/v1/clients/{id}");
    let form = MultipartBody::new()
        .text("name", "Old backup")
        .file("profileImage", "again.png", common::PNG);
    let response = send_multipart(app, Method::PUT, &uri, Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let link = format!("{id}_Old_backup.png");
    assert_eq!(body_json(response).await["data"]["image_link"], link.as_str());
    assert_eq!(stored_files(dir.path(), "clients"), vec![link]);
}

// ---------------------------------------------------------------------------
// Gallery batches
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn gallery_skips_failed_files_and_keeps_the_rest(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    reject_updates(&pool, "gallery_items", "NEW.id % 2 = 0").await;

    let form = MultipartBody::new()
        .text("title", "Batch")
        .file("images", "a.png", common::PNG)
        .file("images", "b.png", common::PNG)
        .file("images", "c.png", common::PNG);
    let response = send_multipart(app.clone(), Method::POST, "/api/v1/gallery", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let mut links: Vec<String> = items
        .iter()
        .map(|item| {
            assert_eq!(item["id"].as_i64().unwrap() % 2, 1);
            item["image_link"].as_str().unwrap().to_string()
        })
        .collect();
    links.sort();
    assert_eq!(stored_files(dir.path(), "gallery"), links);

    let listed = body_json(get(app, "/api/v1/gallery").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn gallery_with_no_stored_files_is_an_error(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path()).await;
    let token = admin_token(&app, &pool).await;
    reject_updates(&pool, "gallery_items", "true").await;

    let form = MultipartBody::new()
        .text("title", "Batch")
        .file("images", "a.png", common::PNG)
        .file("images", "b.jpg", common::JPEG);
    let response = send_multipart(app.clone(), Method::POST, "/api/v1/gallery", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let listed = body_json(get(app, "/api/v1/gallery").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
    assert!(stored_files(dir.path(), "gallery").is_empty());
}

use std::path::Path;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use inventory_api::domain::types::RemoteObjectId;
use inventory_api::models::config::{RemoteUploadConfig, ServerConfig};
use inventory_api::repository::DieselRepository;
use inventory_api::routes;
use inventory_api::uploads::{
    ImageUrlResolver, LocalFile, Reconciler, RemoteObjectStore, RemoteStoreError, UploadQueue,
};
use serde_json::{Value, json};

mod common;

const BASE_URL: &str = "https://cdn.example.com/img/";
const BOUNDARY: &str = "----inventory-test-boundary";

/// Remote store double; successful uploads are named `drv_<local file>`.
struct StubStore {
    succeed: bool,
}

#[async_trait]
impl RemoteObjectStore for StubStore {
    async fn upload(
        &self,
        file: &LocalFile,
        _folder_id: &str,
    ) -> Result<RemoteObjectId, RemoteStoreError> {
        if self.succeed {
            Ok(RemoteObjectId::new(format!("drv_{}", file.file_name)).expect("non-empty id"))
        } else {
            Err(RemoteStoreError::Api {
                status: 403,
                message: "The user's Drive storage quota has been exceeded.".into(),
            })
        }
    }

    async fn set_publicly_readable(
        &self,
        _object_id: &RemoteObjectId,
    ) -> Result<(), RemoteStoreError> {
        Ok(())
    }
}

fn server_config(upload_dir: &Path, remote_upload: RemoteUploadConfig) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        upload_dir: upload_dir.to_path_buf(),
        image_base_url: BASE_URL.into(),
        admin_users: vec!["admin".into()],
        serve_uploads: false,
        remote_upload,
    }
}

fn remote_enabled() -> RemoteUploadConfig {
    RemoteUploadConfig {
        enabled: true,
        folder_id: Some("folder-1".into()),
        ..RemoteUploadConfig::default()
    }
}

/// App plus the upload workers backing its queue.
macro_rules! test_app_with_store {
    ($test_db:expr, $upload_dir:expr, $remote:expr, $store:expr) => {{
        let config = server_config($upload_dir, $remote);
        let repo = DieselRepository::new($test_db.pool());
        let reconciler = Reconciler::new(repo.clone(), Arc::new($store), &config.remote_upload);
        let (queue, workers) = UploadQueue::start(reconciler, 8, 1);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(queue))
                .app_data(web::Data::new(ImageUrlResolver::new(BASE_URL)))
                .app_data(web::Data::new(config))
                .configure(routes::configure),
        )
        .await;
        (app, workers)
    }};
}

macro_rules! test_app {
    ($test_db:expr, $upload_dir:expr) => {{
        let (app, _workers) = test_app_with_store!(
            $test_db,
            $upload_dir,
            RemoteUploadConfig::default(),
            StubStore { succeed: false }
        );
        app
    }};
}

fn multipart_body(filename: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn category_crud_and_history() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app!(test_db, uploads.path());

    let req = test::TestRequest::post()
        .uri("/categories/")
        .insert_header(("X-User-Id", "alice"))
        .set_json(json!({"name": "Tools", "description": "hand tools"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Tools");
    assert_eq!(created["description"], "hand tools");

    let req = test::TestRequest::put()
        .uri(&format!("/categories/{id}"))
        .insert_header(("X-User-Id", "alice"))
        .set_json(json!({"name": "Garden"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Garden");
    assert_eq!(updated["description"], Value::Null);

    let req = test::TestRequest::get().uri("/categories/").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{id}"))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!({"ok": true}));

    let req = test::TestRequest::get()
        .uri(&format!("/categories/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Category not found");

    let req = test::TestRequest::get()
        .uri("/history/?table_modified=Category")
        .insert_header(("X-User-Id", "admin"))
        .to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["table_operation"], "add");
    assert_eq!(entries[2]["user_id"], "alice");
    assert_eq!(entries[0]["table_operation"], "delete");
    assert_eq!(entries[0]["user_id"], "system");
}

#[actix_web::test]
async fn history_requires_admin() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app!(test_db, uploads.path());

    let req = test::TestRequest::get().uri("/history/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/history/?date_from=01-02-2025")
        .insert_header(("X-User-Id", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/history/?limit=5000")
        .insert_header(("X-User-Id", "admin"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn items_validate_category_and_summarise_inventory() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app!(test_db, uploads.path());

    let req = test::TestRequest::post()
        .uri("/items/")
        .set_json(json!({"name": "Hammer", "category_id": 77}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Category does not exist");

    let req = test::TestRequest::post()
        .uri("/categories/")
        .set_json(json!({"name": "Tools"}))
        .to_request();
    let tools: Value = test::call_and_read_body_json(&app, req).await;
    let tools_id = tools["id"].as_i64().unwrap();

    for (name, category) in [("Hammer", Some(tools_id)), ("Saw", Some(tools_id)), ("Rope", None)] {
        let req = test::TestRequest::post()
            .uri("/items/")
            .set_json(json!({"name": name, "category_id": category}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/items/?category_id={tools_id}"))
        .to_request();
    let tools_items: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tools_items.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/inventory/").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        summary,
        json!([
            {"category_id": tools_id, "category_name": "Tools", "item_count": 2},
            {"category_id": null, "category_name": "Unassigned", "item_count": 1},
        ])
    );

    let req = test::TestRequest::get().uri("/items/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/items/")
        .set_json(json!({"name": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn image_upload_stores_local_reference() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let app = test_app!(test_db, uploads.path());

    let req = test::TestRequest::post()
        .uri("/items/")
        .set_json(json!({"name": "Lamp"}))
        .to_request();
    let item: Value = test::call_and_read_body_json(&app, req).await;
    let item_id = item["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/items/{item_id}/image"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/items/{item_id}/image"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .insert_header(("X-User-Id", "dave"))
        .set_payload(multipart_body("lamp.png", b"\x89PNG"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let link: Value = test::read_body_json(resp).await;
    let filename = link["filename"].as_str().unwrap().to_string();
    assert!(filename.starts_with(&format!("0-{item_id}-")));
    assert!(filename.ends_with(".png"));
    assert_eq!(link["url"], format!("{BASE_URL}{filename}"));
    assert_eq!(
        std::fs::read(uploads.path().join(&filename)).unwrap(),
        b"\x89PNG"
    );

    let req = test::TestRequest::get()
        .uri(&format!("/items/{item_id}"))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored["image_file"], filename.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/items/{item_id}/image"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, link);

    let req = test::TestRequest::post()
        .uri("/items/999/image")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("lamp.png", b"\x89PNG"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn upload_request(item_id: i64) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/items/{item_id}/image"))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("lamp.png", b"\x89PNG"))
}

#[actix_web::test]
async fn remote_upload_replaces_local_reference_in_background() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let (app, workers) = test_app_with_store!(
        test_db,
        uploads.path(),
        remote_enabled(),
        StubStore { succeed: true }
    );

    let req = test::TestRequest::post()
        .uri("/items/")
        .set_json(json!({"name": "Lamp"}))
        .to_request();
    let item: Value = test::call_and_read_body_json(&app, req).await;
    let item_id = item["id"].as_i64().unwrap();

    let link: Value =
        test::call_and_read_body_json(&app, upload_request(item_id).to_request()).await;
    let local = link["filename"].as_str().unwrap().to_string();
    assert!(local.starts_with(&format!("0-{item_id}-")));
    assert!(local.ends_with(".png"));

    // Closing the queue lets the workers finish the pending job and stop.
    drop(app);
    workers.join().await;

    let app = test_app!(test_db, uploads.path());
    let req = test::TestRequest::get()
        .uri(&format!("/items/{item_id}/image"))
        .to_request();
    let resolved: Value = test::call_and_read_body_json(&app, req).await;
    let remote = format!("drv_{local}");
    assert_eq!(resolved["filename"], remote.as_str());
    assert_eq!(resolved["url"], format!("{BASE_URL}{remote}"));
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn failed_remote_upload_keeps_local_reference() {
    let test_db = common::TestDb::new();
    let uploads = tempfile::tempdir().unwrap();
    let (app, workers) = test_app_with_store!(
        test_db,
        uploads.path(),
        remote_enabled(),
        StubStore { succeed: false }
    );

    let req = test::TestRequest::post()
        .uri("/items/")
        .set_json(json!({"name": "Lamp"}))
        .to_request();
    let item: Value = test::call_and_read_body_json(&app, req).await;
    let item_id = item["id"].as_i64().unwrap();

    let link: Value =
        test::call_and_read_body_json(&app, upload_request(item_id).to_request()).await;
    let local = link["filename"].as_str().unwrap().to_string();

    drop(app);
    workers.join().await;

    let app = test_app!(test_db, uploads.path());
    let req = test::TestRequest::get()
        .uri(&format!("/items/{item_id}/image"))
        .to_request();
    let resolved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resolved, link);
    assert_eq!(resolved["url"], format!("{BASE_URL}{local}"));
    assert!(uploads.path().join(&local).exists());
}

//! Integration tests for the HTTP API.

use axum::http::StatusCode;
use serde_json::json;

use teamdrive_core::types::FileId;

use crate::helpers::{TestEnv, send, send_multipart};

#[tokio::test]
async fn test_health() {
    let env = TestEnv::new().await;
    let router = env.router();

    let response = send(&router, None, "GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["storage_provider"], "local");
}

#[tokio::test]
async fn test_identity_headers_are_required() {
    let env = TestEnv::new().await;
    let router = env.router();

    let response = send(&router, None, "GET", "/api/files/folders/root", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_provision_and_browse_tree() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.member("Ada", "Lovelace").await;

    let response = send(&router, Some(&ctx), "POST", "/api/files/folders/root", None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let root_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = send(&router, Some(&ctx), "POST", "/api/files/folders/root", None).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = send(
        &router,
        Some(&ctx),
        "POST",
        "/api/files/folders",
        Some(json!({ "name": "Reports", "parentFolder": "" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let reports = &response.body["data"];
    assert_eq!(reports["type"], "default");
    assert_eq!(reports["parentFolderId"], root_id.as_str());
    assert_eq!(reports["path"], json!([{ "id": root_id, "name": "root" }]));
    let reports_id = reports["id"].as_str().unwrap().to_string();

    let response = send(&router, Some(&ctx), "GET", "/api/files/folders/root", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let listing = &response.body["data"];
    assert_eq!(listing["folderInfo"]["name"], "root");
    assert_eq!(
        listing["folderInfo"]["path"],
        json!([{ "id": root_id, "name": "root" }])
    );
    assert_eq!(listing["folders"][0]["name"], "Reports");
    assert_eq!(listing["files"], json!([]));

    let uri = format!("/api/files/folders/{reports_id}");
    let response = send(&router, Some(&ctx), "GET", &uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folderInfo"]["id"], reports_id.as_str());
}

#[tokio::test]
async fn test_folder_request_validation() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;

    let response = send(
        &router,
        Some(&ctx),
        "POST",
        "/api/files/folders",
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&router, Some(&ctx), "GET", "/api/files/folders/garbage", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_file_lifecycle() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;
    let reports = env.service.create_folder(&ctx, "Reports", None).await.unwrap();
    let folder = reports.id.to_string();

    let response = send_multipart(
        &router,
        &ctx,
        "/api/files",
        "scan_0001.pdf",
        b"%PDF-1.7",
        &[("fileName", "Q1.pdf"), ("folder", folder.as_str())],
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let file = &response.body["data"];
    assert_eq!(file["name"], "Q1.pdf");
    assert_eq!(file["type"], "other/pdf");
    assert_eq!(file["size"], 8);
    assert_eq!(file["ownerName"], "Ada Lovelace");
    assert_eq!(file["path"], json!(["root", "Reports", "Q1.pdf"]));
    let id = file["id"].as_str().unwrap().to_string();

    let response = send(
        &router,
        Some(&ctx),
        "PATCH",
        "/api/files",
        Some(json!({ "id": id, "name": "Q1-final" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!({ "id": id, "name": "Q1-final.pdf" }));

    let response = send(&router, Some(&ctx), "GET", &format!("/api/files/url/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.body["data"]["url"]
            .as_str()
            .unwrap()
            .contains("?expires=")
    );

    let content_uri = format!("/api/files/{id}/content");
    let response = send(&router, Some(&ctx), "GET", &content_uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.raw[..], b"%PDF-1.7");

    let response = send(&router, Some(&ctx), "DELETE", &format!("/api/files/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = send(&router, Some(&ctx), "GET", &content_uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_without_file_name_field_uses_upload_name() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;

    let response = send_multipart(&router, &ctx, "/api/files", "photo.JPG", b"jpeg", &[]).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], "photo.JPG");
    assert_eq!(response.body["data"]["type"], "image/JPG");
    assert_eq!(response.body["data"]["extension"], "JPG");
    assert_eq!(response.body["data"]["path"], json!(["root", "photo.JPG"]));
}

#[tokio::test]
async fn test_blank_file_name_is_bad_request() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;

    let response = send_multipart(
        &router,
        &ctx,
        "/api/files",
        "a.pdf",
        b"x",
        &[("fileName", "  ")],
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "EMPTY_FILE_NAME");
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;

    let uri = format!("/api/files/url/{}", FileId::new());
    let response = send(&router, Some(&ctx), "GET", &uri, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_image_endpoints() {
    let env = TestEnv::new().await;
    let router = env.router();
    let ctx = env.team().await;

    let response = send_multipart(&router, &ctx, "/api/images", "anim.gif", b"GIF89a", &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_FILE_TYPE");

    let response = send_multipart(&router, &ctx, "/api/images", "me.png", b"\x89PNG", &[]).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let key = response.body["data"]["path"].as_str().unwrap().to_string();
    assert!(key.ends_with(".png"));

    let response = send(&router, Some(&ctx), "DELETE", &format!("/api/images/{key}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(env.stored_objects("images"), 0);
}

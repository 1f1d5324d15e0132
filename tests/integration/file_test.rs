//! Integration tests for files in the folder tree.

use std::sync::Arc;
use std::time::Duration;

use teamdrive_core::error::ErrorKind;
use teamdrive_core::types::FileId;
use teamdrive_database::FileRegistry;

use crate::helpers::{BrokenGateway, TestEnv, file_input};

#[tokio::test]
async fn test_upload_into_subfolder() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let reports = env.service.create_folder(&ctx, "Reports", None).await.unwrap();

    let data: &'static [u8] = &[7u8; 1024];
    let file = env
        .service
        .create_file(
            &ctx,
            file_input("Q1.pdf", ".pdf", Some(reports.id.to_string()), data),
        )
        .await
        .unwrap();

    assert_eq!(file.file_type, "other/pdf");
    assert_eq!(file.path, vec!["root", "Reports", "Q1.pdf"]);
    assert_eq!(file.path.last(), Some(&file.name));
    assert_eq!(file.name, "Q1.pdf");
    assert_eq!(file.extension, "pdf");
    assert_eq!(file.size, 1024);
    assert_eq!(file.folder_id, reports.id);
    assert_eq!(file.owner_name, "Ada Lovelace");
    assert!(file.file_path.ends_with(".pdf"));
    assert!(!file.file_path.contains("Q1"));
    assert_eq!(
        file.url,
        format!("https://cdn.test/documents/{}", file.file_path)
    );
    assert_eq!(env.stored_objects("documents"), 1);
}

#[tokio::test]
async fn test_file_path_follows_folder_lineage() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let a = env.service.create_folder(&ctx, "a", None).await.unwrap();
    let b = env
        .service
        .create_folder(&ctx, "b", Some(&a.id.to_string()))
        .await
        .unwrap();

    let at_root = env
        .service
        .create_file(&ctx, file_input("top.md", "md", None, b"#"))
        .await
        .unwrap();
    let nested = env
        .service
        .create_file(&ctx, file_input("deep.md", "md", Some(b.id.to_string()), b"#"))
        .await
        .unwrap();

    assert_eq!(at_root.path, vec!["root", "top.md"]);
    assert_eq!(nested.path, vec!["root", "a", "b", "deep.md"]);
}

#[tokio::test]
async fn test_image_documents_are_classified() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;

    for (ext, expected) in [
        ("jpg", "image/jpg"),
        (".JPEG", "image/JPEG"),
        ("png", "image/png"),
        ("docx", "other/docx"),
        ("xyz", "other/xyz"),
        ("", "other"),
    ] {
        let file = env
            .service
            .create_file(&ctx, file_input("upload", ext, None, b"x"))
            .await
            .unwrap();
        assert_eq!(file.file_type, expected, "extension {ext:?}");
    }
}

#[tokio::test]
async fn test_blank_display_name_is_rejected_before_upload() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;

    let err = env
        .service
        .create_file(&ctx, file_input("   ", "pdf", None, b"x"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::EmptyFileName);
    assert_eq!(env.stored_objects("documents"), 0);
}

#[tokio::test]
async fn test_rename_keeps_extension_and_ancestors() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let reports = env.service.create_folder(&ctx, "Reports", None).await.unwrap();
    let file = env
        .service
        .create_file(
            &ctx,
            file_input("Q1.pdf", "pdf", Some(reports.id.to_string()), b"%PDF"),
        )
        .await
        .unwrap();

    let renamed = env
        .service
        .rename_file(&ctx, &file.id.to_string(), "Q1-final")
        .await
        .unwrap();
    assert_eq!(renamed.id, file.id);
    assert_eq!(renamed.name, "Q1-final.pdf");

    let stored = env.db.get_file_by_id(ctx.team_id, file.id).await.unwrap();
    assert_eq!(stored.name, "Q1-final.pdf");
    assert_eq!(stored.path, vec!["root", "Reports", "Q1-final.pdf"]);
    assert_eq!(stored.path[..2], file.path[..2]);
    assert_eq!(stored.extension, "pdf");
    assert_eq!(stored.file_path, file.file_path);
}

#[tokio::test]
async fn test_rename_keeps_upper_case_extension() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let file = env
        .service
        .create_file(&ctx, file_input("Photo.JPG", ".JPG", None, b"jpeg"))
        .await
        .unwrap();
    assert_eq!(file.extension, "JPG");
    assert_eq!(file.file_type, "image/JPG");

    let renamed = env
        .service
        .rename_file(&ctx, &file.id.to_string(), "Photo2")
        .await
        .unwrap();

    assert_eq!(renamed.name, "Photo2.JPG");
    assert_eq!(renamed.extension, "JPG");
    assert_eq!(renamed.path, vec!["root", "Photo2.JPG"]);
}

#[tokio::test]
async fn test_rename_to_blank_is_rejected() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let file = env
        .service
        .create_file(&ctx, file_input("a.txt", "txt", None, b"a"))
        .await
        .unwrap();

    let err = env
        .service
        .rename_file(&ctx, &file.id.to_string(), " ")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyFileName);
}

#[tokio::test]
async fn test_delete_removes_object_and_record() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let file = env
        .service
        .create_file(&ctx, file_input("Q1.pdf", "pdf", None, b"%PDF"))
        .await
        .unwrap();
    assert_eq!(env.stored_objects("documents"), 1);

    env.service
        .delete_file(&ctx, &file.id.to_string())
        .await
        .unwrap();

    let err = env.db.get_file_by_id(ctx.team_id, file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(env.stored_objects("documents"), 0);

    let err = env
        .service
        .delete_file(&ctx, &file.id.to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_read_and_presign() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;
    let file = env
        .service
        .create_file(&ctx, file_input("notes.txt", "txt", None, b"hello team"))
        .await
        .unwrap();
    let id = file.id.to_string();

    let content = env.service.read_file(&ctx, &id).await.unwrap();
    assert_eq!(&content.data[..], b"hello team");
    assert_eq!(content.file, file);

    let url = env.service.get_file_presigned_url(&ctx, &id).await.unwrap();
    let prefix = format!("https://cdn.test/documents/{}?expires=", file.file_path);
    assert!(url.starts_with(&prefix), "{url}");
}

#[tokio::test]
async fn test_presign_of_unknown_file_is_not_found() {
    let env = TestEnv::new().await;
    let ctx = env.team().await;

    let err = env
        .service
        .get_file_presigned_url(&ctx, &FileId::new().to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = env
        .service
        .get_file_presigned_url(&ctx, "42")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidId);
}

#[tokio::test]
async fn test_files_are_invisible_to_other_teams() {
    let env = TestEnv::new().await;
    let alpha = env.team().await;
    let beta = env.team().await;
    let file = env
        .service
        .create_file(&alpha, file_input("a.txt", "txt", None, b"a"))
        .await
        .unwrap();
    let id = file.id.to_string();

    for err in [
        env.service.read_file(&beta, &id).await.unwrap_err(),
        env.service.rename_file(&beta, &id, "b").await.unwrap_err(),
        env.service.delete_file(&beta, &id).await.unwrap_err(),
    ] {
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
    assert_eq!(env.stored_objects("documents"), 1);
}

#[tokio::test]
async fn test_failed_registration_removes_uploaded_object() {
    let env = TestEnv::with_faulty_registry(true, false).await;
    let ctx = env.team().await;

    let err = env
        .service
        .create_file(&ctx, file_input("Q1.pdf", "pdf", None, b"%PDF"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Persistence);
    assert_eq!(env.stored_objects("documents"), 0);
}

#[tokio::test]
async fn test_failed_record_delete_leaves_detectable_dangling_record() {
    let env = TestEnv::with_faulty_registry(false, true).await;
    let ctx = env.team().await;
    let file = env
        .service
        .create_file(&ctx, file_input("Q1.pdf", "pdf", None, b"%PDF"))
        .await
        .unwrap();

    let err = env
        .service
        .delete_file(&ctx, &file.id.to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    assert_eq!(env.stored_objects("documents"), 0);
    let dangling = env.db.get_file_by_id(ctx.team_id, file.id).await.unwrap();
    assert_eq!(dangling.file_path, file.file_path);
}

#[tokio::test]
async fn test_storage_failure_writes_no_record() {
    let env = TestEnv::with_gateway(Arc::new(BrokenGateway { stall: false }));
    let ctx = env.team().await;

    let err = env
        .service
        .create_file(&ctx, file_input("Q1.pdf", "pdf", None, b"%PDF"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);

    let root = env.service.get_folder_root(&ctx).await.unwrap();
    assert!(root.files.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stalled_upload_times_out() {
    let env = TestEnv::with_gateway(Arc::new(BrokenGateway { stall: true }));
    let ctx = env.team().await;

    let started = tokio::time::Instant::now();
    let err = env
        .service
        .create_file(&ctx, file_input("big.bin", "bin", None, b"0"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Timeout);
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(70));
    assert!(waited < Duration::from_secs(3600));
}

//! Integration tests for standalone images.

use bytes::Bytes;

use teamdrive_core::error::ErrorKind;
use teamdrive_core::traits::storage::bytes_stream;
use teamdrive_service::UploadImageInput;

use crate::helpers::TestEnv;

fn image(file_name: &str, extension: &str) -> UploadImageInput {
    UploadImageInput {
        file_name: file_name.to_string(),
        extension: extension.to_string(),
        size: 4,
        data: bytes_stream(Bytes::from_static(b"\x89PNG")),
    }
}

#[tokio::test]
async fn test_allow_listed_extensions_are_accepted() {
    let env = TestEnv::new().await;

    for ext in ["jpg", ".jpeg", ".png", "svg"] {
        let upload = env
            .service
            .upload_image(image("avatar", ext))
            .await
            .unwrap();
        assert_eq!(upload.url, format!("https://cdn.test/images/{}", upload.path));
        assert!(upload.path.ends_with(ext.trim_start_matches('.')));
    }
    assert_eq!(env.stored_objects("images"), 4);
    assert_eq!(env.stored_objects("documents"), 0);
}

#[tokio::test]
async fn test_other_extensions_are_rejected() {
    let env = TestEnv::new().await;

    for ext in ["gif", "pdf", "webp", "", "PNG", ".JPEG", ".Svg"] {
        let err = env
            .service
            .upload_image(image("banner", ext))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFileType, "extension {ext:?}");
    }
    assert_eq!(env.stored_objects("images"), 0);
}

#[tokio::test]
async fn test_delete_image_by_key() {
    let env = TestEnv::new().await;
    let upload = env
        .service
        .upload_image(image("avatar.png", "png"))
        .await
        .unwrap();

    env.service.delete_image(&upload.path).await.unwrap();
    assert_eq!(env.stored_objects("images"), 0);

    let err = env.service.delete_image("  ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = env.service.delete_image("../documents/x").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

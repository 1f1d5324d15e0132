//! Shared test helpers for integration tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use teamdrive_api::{AppState, build_router};
use teamdrive_core::config::{AppConfig, StorageConfig};
use teamdrive_core::error::AppError;
use teamdrive_core::result::AppResult;
use teamdrive_core::traits::storage::{ByteStream, StorageGateway, bytes_stream};
use teamdrive_core::types::{FileId, FolderId, TeamId, UserId};
use teamdrive_database::{FileRegistry, MemoryDatabase};
use teamdrive_entity::file::{CreateFile, File};
use teamdrive_entity::user::User;
use teamdrive_service::{CreateFileInput, FolderService, RequestContext};
use teamdrive_storage::StorageManager;
use teamdrive_storage::providers::LocalObjectStore;

/// Service wired over in-memory persistence and a local object store.
pub struct TestEnv {
    _dir: TempDir,
    pub config: AppConfig,
    pub db: Arc<MemoryDatabase>,
    pub storage: Arc<StorageManager>,
    pub service: Arc<FolderService>,
}

impl TestEnv {
    /// Default wiring: memory database, local gateway in a temp dir.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let gateway = LocalObjectStore::new(&config.storage.local.root_path, "https://cdn.test")
            .await
            .unwrap();
        Self::build(dir, config, Arc::new(gateway))
    }

    /// Memory database with a custom gateway.
    pub fn with_gateway(gateway: Arc<dyn StorageGateway>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        Self::build(dir, config, gateway)
    }

    /// Local gateway with a file registry that fails on demand.
    pub async fn with_faulty_registry(fail_create: bool, fail_delete: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let gateway = LocalObjectStore::new(&config.storage.local.root_path, "https://cdn.test")
            .await
            .unwrap();
        let db = Arc::new(MemoryDatabase::new());
        let registry = Arc::new(FaultyRegistry {
            inner: db.clone(),
            fail_create,
            fail_delete,
        });
        Self::assemble(dir, config, db, Arc::new(gateway), registry)
    }

    fn build(dir: TempDir, config: AppConfig, gateway: Arc<dyn StorageGateway>) -> Self {
        let db = Arc::new(MemoryDatabase::new());
        Self::assemble(dir, config, db.clone(), gateway, db)
    }

    fn assemble(
        dir: TempDir,
        config: AppConfig,
        db: Arc<MemoryDatabase>,
        gateway: Arc<dyn StorageGateway>,
        registry: Arc<dyn FileRegistry>,
    ) -> Self {
        let storage = Arc::new(StorageManager::new(gateway, &config.storage));
        let service = Arc::new(FolderService::new(
            db.clone(),
            registry,
            db.clone(),
            Arc::clone(&storage),
            config.timeouts.clone(),
            config.storage.presign_ttl(),
        ));
        Self {
            _dir: dir,
            config,
            db,
            storage,
            service,
        }
    }

    /// Seed a user and return a context acting as them in a fresh team.
    pub async fn member(&self, first_name: &str, last_name: &str) -> RequestContext {
        let user_id = UserId::new();
        self.db
            .insert_user(User {
                id: user_id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: None,
            })
            .await;
        RequestContext::new(TeamId::new(), user_id)
    }

    /// Provisioned team: a member plus the team's root folder.
    pub async fn team(&self) -> RequestContext {
        let ctx = self.member("Ada", "Lovelace").await;
        self.service.create_root_folder(ctx.team_id).await.unwrap();
        ctx
    }

    /// Number of stored objects in a bucket of the local gateway.
    pub fn stored_objects(&self, bucket: &str) -> usize {
        let path = Path::new(&self.config.storage.local.root_path).join(bucket);
        let Ok(entries) = std::fs::read_dir(path) else {
            return 0;
        };
        entries
            .filter_map(Result::ok)
            .filter(|e| !e.file_name().to_string_lossy().ends_with(".meta.json"))
            .count()
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(
            Arc::new(self.config.clone()),
            Arc::clone(&self.storage),
            Arc::clone(&self.service),
        ))
    }
}

fn test_config(root: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage = StorageConfig {
        endpoint: "cdn.test".to_string(),
        ..StorageConfig::default()
    };
    config.storage.local.root_path = root.join("objects").to_string_lossy().to_string();
    config
}

/// File input carrying `data` as its content.
pub fn file_input(
    name: &str,
    extension: &str,
    folder: Option<String>,
    data: &'static [u8],
) -> CreateFileInput {
    CreateFileInput {
        display_name: name.to_string(),
        extension: extension.to_string(),
        size: data.len() as u64,
        folder,
        data: bytes_stream(Bytes::from_static(data)),
    }
}

// ── Fakes ────────────────────────────────────────────────────────

/// File registry that can be told to fail writes or deletes.
#[derive(Debug)]
pub struct FaultyRegistry {
    pub inner: Arc<MemoryDatabase>,
    pub fail_create: bool,
    pub fail_delete: bool,
}

#[async_trait]
impl FileRegistry for FaultyRegistry {
    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        if self.fail_create {
            return Err(AppError::persistence("connection reset by peer"));
        }
        self.inner.create(data).await
    }

    async fn get_file_by_id(&self, team_id: TeamId, file_id: FileId) -> AppResult<File> {
        self.inner.get_file_by_id(team_id, file_id).await
    }

    async fn get_files_by_folder_id(
        &self,
        team_id: TeamId,
        folder_id: FolderId,
    ) -> AppResult<Vec<File>> {
        self.inner.get_files_by_folder_id(team_id, folder_id).await
    }

    async fn rename_file(
        &self,
        team_id: TeamId,
        file_id: FileId,
        new_name: &str,
        new_path: &[String],
    ) -> AppResult<()> {
        self.inner
            .rename_file(team_id, file_id, new_name, new_path)
            .await
    }

    async fn delete(&self, team_id: TeamId, file_id: FileId) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::persistence("connection reset by peer"));
        }
        self.inner.delete(team_id, file_id).await
    }
}

/// Gateway whose every call fails, or stalls past any deadline.
#[derive(Debug)]
pub struct BrokenGateway {
    pub stall: bool,
}

impl BrokenGateway {
    async fn fail<T>(&self) -> AppResult<T> {
        if self.stall {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(AppError::storage("minio at 10.0.0.7 refused: quota exceeded"))
    }
}

#[async_trait]
impl StorageGateway for BrokenGateway {
    fn provider_type(&self) -> &str {
        "broken"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn upload_file(
        &self,
        _bucket: &str,
        _object_name: &str,
        _display_name: &str,
        _size_bytes: u64,
        _data: ByteStream,
    ) -> AppResult<()> {
        self.fail().await
    }

    async fn get_file_presigned_url(
        &self,
        _bucket: &str,
        _object_name: &str,
        _ttl: Duration,
    ) -> AppResult<String> {
        self.fail().await
    }

    async fn get_file(&self, _bucket: &str, _object_name: &str) -> AppResult<Bytes> {
        self.fail().await
    }

    async fn delete_file(&self, _bucket: &str, _object_name: &str) -> AppResult<()> {
        self.fail().await
    }
}

// ── HTTP ─────────────────────────────────────────────────────────

pub const BOUNDARY: &str = "teamdrive-test-boundary";

/// Response status with the body parsed as JSON (`Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: Bytes,
}

/// Send a request carrying the team identity headers of `ctx`.
pub async fn send(
    router: &Router,
    ctx: Option<&RequestContext>,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ctx) = ctx {
        builder = builder
            .header("x-team-id", ctx.team_id.to_string())
            .header("x-user-id", ctx.user_id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(router, request).await
}

/// Send a multipart upload with a `file` part and optional text fields.
pub async fn send_multipart(
    router: &Router,
    ctx: &RequestContext,
    uri: &str,
    upload_name: &str,
    data: &[u8],
    fields: &[(&str, &str)],
) -> TestResponse {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{upload_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-team-id", ctx.team_id.to_string())
        .header("x-user-id", ctx.user_id.to_string())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    dispatch(router, request).await
}

async fn dispatch(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);
    TestResponse { status, body, raw }
}

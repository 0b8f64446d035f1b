pub mod handlers;
pub mod response;

use crate::adapters::{InMemorySnapshotStore, LocalStorage, ShellJobRunner};
use crate::core::upload::UploadService;
use crate::core::{ChoreographyTable, ConfigProvider, JobRunner, SnapshotStore, Storage};
use crate::domain::model::ServiceKind;
use crate::utils::error::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState<S: Storage> {
    pub service: ServiceKind,
    pub upload: Arc<UploadService<S>>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub choreography: Arc<ChoreographyTable>,
}

impl<S: Storage> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service,
            upload: Arc::clone(&self.upload),
            snapshots: Arc::clone(&self.snapshots),
            choreography: Arc::clone(&self.choreography),
        }
    }
}

impl<S: Storage> AppState<S> {
    pub fn new(
        service: ServiceKind,
        storage: S,
        runner: Arc<dyn JobRunner>,
        snapshots: Arc<dyn SnapshotStore>,
        choreography: ChoreographyTable,
    ) -> Self {
        Self {
            service,
            upload: Arc::new(UploadService::new(storage, runner)),
            snapshots,
            choreography: Arc::new(choreography),
        }
    }
}

/// 依服務組合掛上路由；所有路由都允許跨來源請求（前端跑在不同 port）
pub fn router<S: Storage + 'static>(state: AppState<S>, max_upload_bytes: usize) -> Router {
    let service = state.service;
    let mut app = Router::new().route("/health", get(handlers::health_check::<S>));

    if service.serves_media() {
        app = app
            .route(
                "/upload",
                post(handlers::upload_file::<S>).layer(DefaultBodyLimit::max(max_upload_bytes)),
            )
            .route("/coordinates", post(handlers::receive_coordinates::<S>));
    }

    if service.serves_scoring() {
        app = app
            .route(
                "/user_bone_positions",
                post(handlers::receive_user_positions::<S>),
            )
            .route(
                "/model_bone_positions",
                post(handlers::receive_model_positions::<S>),
            )
            .route("/calculate_score", get(handlers::calculate_score::<S>))
            .route("/endpoint", post(handlers::receive_positions::<S>));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 以設定組出完整應用：本機存檔、shell 腳本、有上限的行程內快照
pub fn build_app<C: ConfigProvider>(config: &C) -> Result<Router> {
    let storage = LocalStorage::new(config.upload_dir().to_string());
    if config.service().serves_media() {
        storage.ensure_base_dir()?;
        tracing::info!("📁 Upload directory: {}", storage.base_path());
    }

    let runner = Arc::new(ShellJobRunner::new(config.shell(), config.script()));
    let snapshots = Arc::new(InMemorySnapshotStore::new(config.max_sessions()));
    let choreography = config.choreography();
    tracing::debug!("Choreography reference has {} bones", choreography.len());
    for (bone, pos) in choreography.iter() {
        tracing::debug!("  {}: ({}, {}, {})", bone, pos.x, pos.y, pos.z);
    }

    let state = AppState::new(config.service(), storage, runner, snapshots, choreography);
    Ok(router(state, config.max_upload_bytes()))
}

#![allow(dead_code)]

use async_trait::async_trait;
use dance_backend::core::{ChoreographyTable, JobInput, JobOutput, JobRunner};
use dance_backend::domain::model::ServiceKind;
use dance_backend::{router, AppState, InMemorySnapshotStore, LocalStorage, Result};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// 記錄呼叫並回傳固定結果的腳本替身
pub struct FakeRunner {
    output: JobOutput,
    pub calls: Mutex<Vec<JobInput>>,
}

impl FakeRunner {
    pub fn succeeding(stdout: &str) -> Self {
        Self::with_output(JobOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }

    pub fn failing(stderr: &str, exit_code: i32) -> Self {
        Self::with_output(JobOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(exit_code),
        })
    }

    fn with_output(output: JobOutput) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl JobRunner for FakeRunner {
    async fn submit(&self, input: &JobInput) -> Result<JobOutput> {
        self.calls.lock().unwrap().push(input.clone());
        Ok(self.output.clone())
    }
}

/// 在隨機 port 啟動服務，回傳 base URL
pub async fn spawn_app(service: ServiceKind, upload_dir: &str, runner: Arc<FakeRunner>) -> String {
    spawn_app_with_limit(service, upload_dir, runner, 16 * 1024 * 1024).await
}

pub async fn spawn_app_with_limit(
    service: ServiceKind,
    upload_dir: &str,
    runner: Arc<FakeRunner>,
    max_upload_bytes: usize,
) -> String {
    let state = AppState::new(
        service,
        LocalStorage::new(upload_dir.to_string()),
        runner,
        Arc::new(InMemorySnapshotStore::default()),
        ChoreographyTable::default(),
    );
    let app = router(state, max_upload_bytes);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

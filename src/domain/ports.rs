use crate::domain::model::{
    BoneSnapshot, ChoreographyTable, JobInput, JobOutput, ServiceKind, SessionId, SnapshotPair,
    SnapshotSlot,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// 寫入檔案，回傳完整路徑；同名檔案直接覆蓋
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<std::path::PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn service(&self) -> ServiceKind;
    fn upload_dir(&self) -> &str;
    fn script(&self) -> &str;
    fn shell(&self) -> &str;
    fn max_upload_bytes(&self) -> usize;
    fn max_sessions(&self) -> usize;
    fn choreography(&self) -> ChoreographyTable;
}

/// 兩段式評分的快照暫存，每個 session 一組 user/model
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn put(&self, session: &SessionId, slot: SnapshotSlot, snapshot: BoneSnapshot)
        -> Result<()>;
    async fn pair(&self, session: &SessionId) -> Result<SnapshotPair>;
}

/// 外部處理腳本的執行介面
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn submit(&self, input: &JobInput) -> Result<JobOutput>;
}

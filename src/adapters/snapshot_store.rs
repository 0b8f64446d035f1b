use crate::config::DEFAULT_MAX_SESSIONS;
use crate::core::{BoneSnapshot, SessionId, SnapshotSlot, SnapshotStore};
use crate::domain::model::SnapshotPair;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SessionEntry {
    pair: SnapshotPair,
    written_at: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<SessionId, SessionEntry>,
    clock: u64,
}

/// 行程內的快照暫存。每個 session 一組，最後寫入者為準。
/// 超過 `capacity` 個 session 時丟掉最久沒寫入的那一組
#[derive(Debug)]
pub struct InMemorySnapshotStore {
    capacity: usize,
    sessions: RwLock<Sessions>,
}

impl InMemorySnapshotStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: RwLock::new(Sessions::default()),
        }
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn put(
        &self,
        session: &SessionId,
        slot: SnapshotSlot,
        snapshot: BoneSnapshot,
    ) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.clock += 1;
        let written_at = sessions.clock;

        let entry = sessions.entries.entry(session.clone()).or_default();
        entry.pair.set(slot, snapshot);
        entry.written_at = written_at;

        if sessions.entries.len() > self.capacity {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.written_at)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                sessions.entries.remove(&oldest);
                tracing::debug!(
                    "Dropped snapshot session {} ({} sessions kept)",
                    oldest.as_str(),
                    self.capacity
                );
            }
        }
        Ok(())
    }

    async fn pair(&self, session: &SessionId) -> Result<SnapshotPair> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .entries
            .get(session)
            .map(|entry| entry.pair.clone())
            .unwrap_or_default())
    }
}

// Adapters layer: concrete implementations of the domain ports (local storage, shell jobs, snapshot store).

pub mod job_runner;
pub mod snapshot_store;
pub mod storage;

pub use job_runner::ShellJobRunner;
pub use snapshot_store::InMemorySnapshotStore;
pub use storage::LocalStorage;

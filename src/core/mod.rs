pub mod scoring;
pub mod upload;
pub mod visibility;

pub use crate::domain::model::{
    BoneSnapshot, ChoreographyTable, JobInput, JobOutput, Position, SessionId, SnapshotSlot,
};
pub use crate::domain::ports::{ConfigProvider, JobRunner, SnapshotStore, Storage};
pub use crate::utils::error::Result;

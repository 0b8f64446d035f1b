pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{InMemorySnapshotStore, LocalStorage, ShellJobRunner};
pub use http::{build_app, router, AppState};
pub use utils::error::{Result, ServiceError};

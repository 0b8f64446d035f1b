#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_UPLOAD_DIR: &str = "EDGE/custom_music";
pub const DEFAULT_SCRIPT: &str = "create_dance.sh";
pub const DEFAULT_SHELL: &str = "bash";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

pub const SERVICE_NAMES: [&str; 3] = ["media", "scoring", "all"];

pub fn megabytes(mb: usize) -> usize {
    mb.saturating_mul(1024 * 1024)
}

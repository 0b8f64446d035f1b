use crate::config::{
    megabytes, DEFAULT_HOST, DEFAULT_MAX_SESSIONS, DEFAULT_MAX_UPLOAD_MB, DEFAULT_SCRIPT,
    DEFAULT_SHELL, DEFAULT_UPLOAD_DIR,
};
use crate::core::{ChoreographyTable, ConfigProvider};
use crate::domain::model::ServiceKind;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dance-backend")]
#[command(about = "Upload, landmark and pose scoring endpoints for the dance game")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the flags below when given
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Defaults to 5000 for media/all and 5001 for scoring
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, value_enum, default_value_t = ServiceKind::All)]
    pub service: ServiceKind,

    #[arg(long, default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: String,

    #[arg(long, default_value = DEFAULT_SCRIPT)]
    pub script: String,

    #[arg(long, default_value = DEFAULT_SHELL)]
    pub shell: String,

    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_upload_mb: usize,

    /// Snapshot sessions kept in memory; the least recently written one is dropped first
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.service.default_port())
    }

    fn service(&self) -> ServiceKind {
        self.service
    }

    fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    fn script(&self) -> &str {
        &self.script
    }

    fn shell(&self) -> &str {
        &self.shell
    }

    fn max_upload_bytes(&self) -> usize {
        megabytes(self.max_upload_mb)
    }

    fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn choreography(&self) -> ChoreographyTable {
        ChoreographyTable::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_path("upload_dir", &self.upload_dir)?;
        validate_path("script", &self.script)?;
        validate_non_empty_string("shell", &self.shell)?;
        validate_positive_number("max_upload_mb", self.max_upload_mb, 1)?;
        validate_positive_number("max_sessions", self.max_sessions, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["dance-backend"]);

        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 5000);
        assert_eq!(config.service(), ServiceKind::All);
        assert_eq!(config.upload_dir(), "EDGE/custom_music");
        assert_eq!(config.script(), "create_dance.sh");
        assert_eq!(config.shell(), "bash");
        assert_eq!(config.max_upload_bytes(), 64 * 1024 * 1024);
        assert_eq!(config.max_sessions(), 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scoring_service_defaults_to_5001() {
        let config = CliConfig::parse_from(["dance-backend", "--service", "scoring"]);
        assert_eq!(config.port(), 5001);

        let config =
            CliConfig::parse_from(["dance-backend", "--service", "scoring", "--port", "8080"]);
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn test_zero_upload_limit_is_invalid() {
        let config = CliConfig::parse_from(["dance-backend", "--max-upload-mb", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["dance-backend", "--max-sessions", "0"]);
        assert!(config.validate().is_err());
    }
}

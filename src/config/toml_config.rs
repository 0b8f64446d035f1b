use crate::config::{
    megabytes, DEFAULT_HOST, DEFAULT_MAX_SESSIONS, DEFAULT_MAX_UPLOAD_MB, DEFAULT_SCRIPT,
    DEFAULT_SHELL, DEFAULT_UPLOAD_DIR, SERVICE_NAMES,
};
use crate::core::{ChoreographyTable, ConfigProvider, Position};
use crate::domain::model::ServiceKind;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_one_of, validate_path,
    validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: Option<u16>,
    #[serde(default = "default_service")]
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_script")]
    pub script: String,
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// 取代預設的參考舞步座標
    pub choreography: Option<BTreeMap<String, Position>>,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_service() -> String {
    ServiceKind::All.name().to_string()
}

fn default_upload_dir() -> String {
    DEFAULT_UPLOAD_DIR.to_string()
}

fn default_script() -> String {
    DEFAULT_SCRIPT.to_string()
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_max_upload_mb() -> usize {
    DEFAULT_MAX_UPLOAD_MB
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            service: default_service(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            script: default_script(),
            shell: default_shell(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            choreography: None,
            max_sessions: default_max_sessions(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UPLOAD_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn service_kind(&self) -> ServiceKind {
        match self.server.service.as_str() {
            "media" => ServiceKind::Media,
            "scoring" => ServiceKind::Scoring,
            _ => ServiceKind::All,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server
            .port
            .unwrap_or_else(|| self.service_kind().default_port())
    }

    fn service(&self) -> ServiceKind {
        self.service_kind()
    }

    fn upload_dir(&self) -> &str {
        &self.upload.dir
    }

    fn script(&self) -> &str {
        &self.upload.script
    }

    fn shell(&self) -> &str {
        &self.upload.shell
    }

    fn max_upload_bytes(&self) -> usize {
        megabytes(self.upload.max_upload_mb)
    }

    fn max_sessions(&self) -> usize {
        self.scoring.max_sessions
    }

    fn choreography(&self) -> ChoreographyTable {
        self.scoring
            .choreography
            .clone()
            .map(ChoreographyTable::new)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_one_of("server.service", &self.server.service, &SERVICE_NAMES)?;
        validate_path("upload.dir", &self.upload.dir)?;
        validate_path("upload.script", &self.upload.script)?;
        validate_non_empty_string("upload.shell", &self.upload.shell)?;
        validate_positive_number("upload.max_upload_mb", self.upload.max_upload_mb, 1)?;
        validate_positive_number("scoring.max_sessions", self.scoring.max_sessions, 1)?;

        if let Some(choreography) = &self.scoring.choreography {
            for (bone, pos) in choreography {
                let field = format!("scoring.choreography.{}", bone);
                validate_finite(&field, pos.x)?;
                validate_finite(&field, pos.y)?;
                validate_finite(&field, pos.z)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
service = "scoring"

[upload]
dir = "./music"
script = "generate.sh"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.service(), ServiceKind::Scoring);
        assert_eq!(config.port(), 5001);
        assert_eq!(config.upload_dir(), "./music");
        assert_eq!(config.script(), "generate.sh");
        assert_eq!(config.shell(), "bash");
        assert_eq!(config.choreography(), ChoreographyTable::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.port(), 5000);
        assert_eq!(config.upload_dir(), "EDGE/custom_music");
        assert_eq!(config.max_sessions(), 1024);
        assert!(!config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DANCE_TEST_UPLOAD_DIR", "/srv/uploads");

        let toml_content = r#"
[upload]
dir = "${DANCE_TEST_UPLOAD_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.upload_dir(), "/srv/uploads");

        std::env::remove_var("DANCE_TEST_UPLOAD_DIR");
    }

    #[test]
    fn test_custom_choreography() {
        let toml_content = r#"
[scoring.choreography.head]
x = 0.0
y = 1.7
z = 0.0

[scoring.choreography.leftHand]
x = -0.6
y = 1.2
z = 0.1

[logging]
verbose = true
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let table = config.choreography();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("head"), Some(&Position::new(0.0, 1.7, 0.0)));
        assert!(table.get("hips").is_none());
        assert!(config.verbose());
        assert!(config.json_logs());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[server]\nservice = \"audio\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[upload]\nmax_upload_mb = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[upload]\ndir = \"\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[scoring]\nmax_sessions = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nhost = 1").unwrap_err();
        assert!(matches!(err, ServiceError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
port = 9000
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.port(), 9000);
    }
}

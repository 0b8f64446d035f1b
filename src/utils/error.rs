use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Multipart error: {0}")]
    MultipartError(#[from] axum::extract::multipart::MultipartError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("Bash script failed: {details}")]
    ScriptFailed { details: String },

    #[error("An error occurred while running the script: {details}")]
    ScriptLaunchError { details: String },

    /// 計算過程中的資料錯誤（缺欄位、型別不符等）
    #[error("{message}")]
    ComputationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    ExternalProcess,
    Computation,
    Configuration,
    System,
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self::ComputationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BadRequest { .. } | Self::MultipartError(_) => ErrorCategory::Client,
            Self::ScriptFailed { .. } | Self::ScriptLaunchError { .. } => {
                ErrorCategory::ExternalProcess
            }
            Self::ComputationError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Computation
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// 超過上傳上限的 multipart 錯誤回 413，其餘依分類
    pub fn status_code(&self) -> u16 {
        if let Self::MultipartError(e) = self {
            return e.status().as_u16();
        }
        match self.category() {
            ErrorCategory::Client => 400,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Client => "Check the request body and field names",
            ErrorCategory::ExternalProcess => {
                "Check that the processing script exists and runs from the working directory"
            }
            ErrorCategory::Computation => "Check that every position carries numeric x, y and z",
            ErrorCategory::Configuration => "Check the command line flags or the TOML config file",
            ErrorCategory::System => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        let err = ServiceError::bad_request("No file provided");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "No file provided");
    }

    #[test]
    fn test_script_and_computation_errors_map_to_500() {
        let err = ServiceError::ScriptFailed {
            details: "boom".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::ExternalProcess);
        assert_eq!(err.status_code(), 500);

        let err = ServiceError::computation("missing field `x`");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "missing field `x`");
    }
}

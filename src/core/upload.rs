use crate::domain::model::{JobInput, JobOutput};
use crate::domain::ports::{JobRunner, Storage};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{has_extension, validate_file_name};
use std::sync::Arc;

pub const ALLOWED_EXTENSION: &str = ".wav";

/// 上傳後交給外部腳本處理的結果
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedUpload {
    pub file_name: String,
    pub output: String,
}

pub struct UploadService<S: Storage> {
    storage: S,
    runner: Arc<dyn JobRunner>,
}

impl<S: Storage> UploadService<S> {
    pub fn new(storage: S, runner: Arc<dyn JobRunner>) -> Self {
        Self { storage, runner }
    }

    pub fn check_file_name<'a>(&self, file_name: &'a str) -> Result<&'a str> {
        if file_name.is_empty() {
            return Err(ServiceError::bad_request("No file selected"));
        }
        if !has_extension(file_name, ALLOWED_EXTENSION) {
            return Err(ServiceError::bad_request(
                "Invalid file type. Only WAV files are allowed",
            ));
        }
        validate_file_name(file_name)?;
        Ok(file_name)
    }

    /// 存檔（同名覆蓋）後同步執行處理腳本，不設逾時
    pub async fn process(&self, file_name: &str, data: &[u8]) -> Result<ProcessedUpload> {
        let saved_path = self.storage.write_file(file_name, data).await?;
        tracing::info!("💾 Saved upload {} ({} bytes)", saved_path.display(), data.len());

        let output = self
            .runner
            .submit(&JobInput {
                file_path: saved_path,
            })
            .await?;

        Self::interpret(file_name, output)
    }

    fn interpret(file_name: &str, output: JobOutput) -> Result<ProcessedUpload> {
        if output.success() {
            tracing::info!("✅ Processing script finished for {}", file_name);
            Ok(ProcessedUpload {
                file_name: file_name.to_string(),
                output: output.stdout.trim().to_string(),
            })
        } else {
            tracing::error!(
                "❌ Processing script failed for {} (exit code: {:?})",
                file_name,
                output.exit_code
            );
            Err(ServiceError::ScriptFailed {
                details: output.stderr.trim().to_string(),
            })
        }
    }
}

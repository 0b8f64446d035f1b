use crate::core::{JobInput, JobOutput, JobRunner};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use tokio::process::Command;

/// 以 `<shell> <script>` 執行處理腳本，不帶參數，等待結束不設逾時
#[derive(Debug, Clone)]
pub struct ShellJobRunner {
    shell: String,
    script: String,
}

impl ShellJobRunner {
    pub fn new(shell: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            script: script.into(),
        }
    }
}

#[async_trait]
impl JobRunner for ShellJobRunner {
    async fn submit(&self, input: &JobInput) -> Result<JobOutput> {
        tracing::info!(
            "🚀 Running {} {} for {}",
            self.shell,
            self.script,
            input.file_path.display()
        );

        let output = Command::new(&self.shell)
            .arg(&self.script)
            .output()
            .await
            .map_err(|e| ServiceError::ScriptLaunchError {
                details: e.to_string(),
            })?;

        let result = JobOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        tracing::debug!("Script exit code: {:?}", result.exit_code);

        Ok(result)
    }
}

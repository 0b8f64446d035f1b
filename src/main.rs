use anyhow::Context;
use clap::Parser;
use dance_backend::core::ConfigProvider;
use dance_backend::utils::{logger, validation::Validate};
use dance_backend::{build_app, CliConfig, TomlConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            // 載入 TOML 配置，命令列的 --verbose / --json-logs 仍然有效
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            logger::init_logger(
                cli.verbose || config.verbose(),
                cli.json_logs || config.json_logs(),
            );
            tracing::info!("📁 Loaded configuration from: {}", path);
            serve(config).await
        }
        None => {
            logger::init_logger(cli.verbose, cli.json_logs);
            if cli.verbose {
                tracing::debug!("CLI config: {:?}", cli);
            }
            serve(cli).await
        }
    }
}

async fn serve<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let app = build_app(&config).context("failed to build application")?;

    let address = format!("{}:{}", config.host(), config.port());
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        "🚀 Serving {} endpoints on http://{}",
        config.service().name(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

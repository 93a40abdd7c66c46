use juxta_api::{ApiServer, InMemorySessionStore, SharedSessions};
use juxta_telemetry::{Metrics, build_sha};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Dependencies required to boot the comparison service.
pub(crate) struct BootstrapDependencies {
    config: ServerConfig,
    sessions: SharedSessions,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config = ServerConfig::from_env()
            .map_err(|err| AppError::config("server_config.from_env", err))?;
        Ok(Self {
            config,
            sessions: InMemorySessionStore::shared(),
        })
    }
}

/// Entry point for the server boot sequence.
///
/// # Errors
///
/// Returns an error if configuration is invalid, telemetry cannot be
/// installed, or the listener fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { config, sessions } = dependencies;
    juxta_telemetry::init_logging(&config.logging())
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    info!(build_sha = build_sha(), "juxta bootstrap starting");

    let telemetry = Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
    let api = ApiServer::new(sessions, telemetry);

    info!(addr = %config.bind_addr, "Launching API listener");
    api.serve(config.bind_addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("API server shutdown complete");
    Ok(())
}

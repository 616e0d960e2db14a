use std::net::SocketAddr;
use std::sync::Arc;

use taskboard_config::defaults::ENV_MODE;
use taskboard_config::{ConfigurationRecord, Environment, resolve};
use taskboard_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, Metrics};
use taskboard_web::ApiServer;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

const ENV_BIND_ADDR: &str = "TASKBOARD_BIND_ADDR";
const ENV_LOG_FORMAT: &str = "TASKBOARD_LOG_FORMAT";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Dependencies required to bootstrap the host.
pub(crate) struct BootstrapDependencies {
    logging: LoggingConfig<'static>,
    environment: Environment,
    bind_addr: SocketAddr,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        Self::from_values(
            std::env::var(ENV_LOG_FORMAT).ok().as_deref(),
            std::env::var(ENV_BIND_ADDR).ok().as_deref(),
            Environment::from_process(),
        )
    }

    fn from_values(
        log_format: Option<&str>,
        bind_addr: Option<&str>,
        environment: Environment,
    ) -> AppResult<Self> {
        let logging = LoggingConfig {
            format: LogFormat::from_name(log_format),
            ..LoggingConfig::default()
        };
        Ok(Self {
            logging,
            environment,
            bind_addr: parse_bind_addr(bind_addr)?,
        })
    }
}

/// Entry point for the host boot sequence.
///
/// # Errors
///
/// Returns an error if the environment is invalid, logging cannot be
/// installed, or the server fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    taskboard_telemetry::init_logging(&dependencies.logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    let BootstrapDependencies {
        logging: _,
        environment,
        bind_addr,
    } = dependencies;
    let _context = GlobalContextGuard::new(environment.get(ENV_MODE).unwrap_or("unset"));

    info!("Taskboard host bootstrap starting");

    let config = Arc::new(resolve(&environment));
    log_configuration(&config)?;

    let telemetry =
        Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
    let server = ApiServer::new(Arc::clone(&config), telemetry);
    server
        .serve(bind_addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;

    info!("Taskboard host shutdown complete");
    Ok(())
}

fn log_configuration(config: &ConfigurationRecord) -> AppResult<()> {
    info!(
        output = config.output_mode().as_str(),
        api_url = config.public_api_url(),
        ws_url = config.public_ws_url(),
        images_unoptimized = config.images_unoptimized(),
        redirect_rules = config.redirect_rules().len(),
        "front-end configuration resolved"
    );
    let manifest = config
        .to_manifest()
        .map_err(|err| AppError::config("config.manifest", err))?;
    debug!(%manifest, "framework manifest");
    Ok(())
}

fn parse_bind_addr(value: Option<&str>) -> AppResult<SocketAddr> {
    let raw = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BIND_ADDR);
    raw.parse().map_err(|_| AppError::InvalidConfig {
        field: ENV_BIND_ADDR,
        reason: "invalid_socket_addr",
        value: Some(raw.to_string()),
    })
}

use std::path::PathBuf;

use clap::Parser;

use todo_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use todo_gateway::lifecycle;
use todo_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "todo-gateway")]
#[command(about = "REST gateway in front of the todo-manager gRPC service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override backend.address (e.g. http://todo-manager:50051).
    #[arg(long)]
    backend_addr: Option<String>,
}

impl Cli {
    fn load(&self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(addr) = &self.backend_addr {
            config.backend.address = addr.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("todo-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.address,
        route_prefix = %config.http.route_prefix,
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Gateway failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

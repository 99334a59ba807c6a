//! CalmSpace HTTP server binary.
//!
//! Loads the retrieval corpora, wires the Groq client and serves the API
//! plus the bundled chat page.

use std::path::PathBuf;
use std::sync::Arc;

use calmspace_api::config::ApiConfig;
use calmspace_core::dataset::DatasetHandler;
use calmspace_core::llm::GroqClient;
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "calmspace_server", about = "CalmSpace chat server")]
struct Args {
    /// Port to listen on. Overrides the port in `BIND_ADDR`.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Interface to bind. Overrides the host in `BIND_ADDR`.
    #[arg(long)]
    host: Option<String>,

    /// Directory holding the CSV corpora.
    #[arg(long, env = "CALMSPACE_DATASET_DIR")]
    dataset_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut ApiConfig) {
        let (default_host, default_port) = config
            .bind_addr
            .rsplit_once(':')
            .map(|(h, p)| (h.to_string(), p.to_string()))
            .unwrap_or_else(|| ("0.0.0.0".into(), "5050".into()));
        let host = self.host.unwrap_or(default_host);
        let port = self.port.map(|p| p.to_string()).unwrap_or(default_port);
        config.bind_addr = format!("{host}:{port}");
        if let Some(dir) = self.dataset_dir {
            config.datasets.dir = dir;
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,calmspace_api=debug,calmspace_core=debug".into()),
        )
        .init();

    let mut config = ApiConfig::from_env();
    Args::parse().apply(&mut config);

    info!(
        bind_addr = %config.bind_addr,
        dataset_dir = %config.datasets.dir.display(),
        model = %config.llm.model,
        "starting calmspace_server"
    );

    if config.llm.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; replies will come from the datasets and canned fallbacks");
    }

    let datasets = Arc::new(DatasetHandler::load(&config.datasets));
    if !datasets.is_loaded() {
        warn!("no dataset corpora loaded; retrieval disabled");
    }

    let model = Arc::new(GroqClient::new(config.llm.clone())?);
    let state = calmspace_api::AppState::new(model, datasets);
    let app = calmspace_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            bind_addr: "0.0.0.0:5050".into(),
            llm: Default::default(),
            datasets: calmspace_core::dataset::DatasetConfig {
                dir: PathBuf::from("dataset"),
            },
        }
    }

    #[test]
    fn args_override_bind_addr() {
        let mut config = config();
        Args::parse_from(["calmspace_server", "--port", "8080", "--host", "127.0.0.1"])
            .apply(&mut config);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn missing_args_keep_config() {
        let mut config = config();
        let args = Args {
            port: None,
            host: None,
            dataset_dir: Some(PathBuf::from("/data")),
        };
        args.apply(&mut config);
        assert_eq!(config.bind_addr, "0.0.0.0:5050");
        assert_eq!(config.datasets.dir, PathBuf::from("/data"));
    }
}

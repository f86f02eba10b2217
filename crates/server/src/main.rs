//! ModelServer - Main Entry Point
//!
//! Serves a statically configured set of models over gRPC, configured either
//! by a multi-model config file or by single-model flags.

use clap::{CommandFactory, Parser};
use modelserver::engine::PassthroughEngine;
use modelserver::grpc::server;
use modelserver_common::{ConfigResolver, Result, ServerOptions};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "model-server")]
#[command(about = "gRPC model server", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 8500, env = "MODELSERVER_PORT")]
    port: u16,

    /// If non-empty, read a model config file and serve the models in it.
    /// --model_name and --model_base_path are ignored when this is set.
    #[arg(long = "model_config_file", default_value = "", env = "MODELSERVER_MODEL_CONFIG_FILE")]
    model_config_file: String,

    /// Name of the model served in single-model mode
    #[arg(long = "model_name", env = "MODELSERVER_MODEL_NAME")]
    model_name: Option<String>,

    /// Path to the model root in single-model mode
    #[arg(long = "model_base_path", default_value = "", env = "MODELSERVER_MODEL_BASE_PATH")]
    model_base_path: String,

    /// Enable request batching
    #[arg(long = "enable_batching", env = "MODELSERVER_ENABLE_BATCHING")]
    enable_batching: bool,

    /// Batching parameters file; requires --enable_batching
    #[arg(long = "batching_parameters_file", default_value = "", env = "MODELSERVER_BATCHING_PARAMETERS_FILE")]
    batching_parameters_file: String,

    /// Interval in seconds between polls of the file system for new model versions
    #[arg(long = "file_system_poll_wait_seconds", default_value_t = 1, env = "MODELSERVER_POLL_WAIT_SECONDS")]
    file_system_poll_wait_seconds: u64,

    /// Number of threads for running a session; auto-configured when 0
    #[arg(long = "tensorflow_session_parallelism", default_value_t = 0, env = "MODELSERVER_SESSION_PARALLELISM")]
    tensorflow_session_parallelism: u64,

    /// Unrecognized positional arguments
    #[arg(hide = true)]
    extra: Vec<String>,
}

impl Cli {
    fn options(&self) -> ServerOptions {
        ServerOptions {
            port: self.port,
            model_config_file: self.model_config_file.clone(),
            model_name: self.model_name.clone(),
            model_base_path: self.model_base_path.clone(),
            enable_batching: self.enable_batching,
            batching_parameters_file: self.batching_parameters_file.clone(),
            file_system_poll_wait_seconds: self.file_system_poll_wait_seconds,
            session_parallelism: self.tensorflow_session_parallelism,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modelserver=info,modelserver_common=info,model_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Some(first) = cli.extra.first() {
        warn!("unknown argument: {}", first);
        eprintln!("unknown argument: {}\n{}", first, Cli::command().render_usage());
    }

    let options = cli.options();
    let config = match ConfigResolver::resolve(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n\n{}", e, Cli::command().render_help());
            std::process::exit(1);
        }
    };

    info!("Starting ModelServer on port {}", options.port);

    let listen_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, options.port));
    match server::start(&config, listen_addr, PassthroughEngine::initialize).await {
        Err(e) if e.is_fatal() => {
            error!("ModelServer failed to start: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
        other => other,
    }
}

//! ModelServer Client - Main Entry Point
//!
//! Sends one Predict call to a model server and prints the response as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use modelserver_client::{parse_float_input, PredictionClient};
use modelserver_proto::DEFAULT_SIGNATURE_NAME;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "predict-client")]
#[command(about = "Send a Predict request to a model server", long_about = None)]
struct Cli {
    /// Server endpoint
    #[arg(long, default_value = "http://localhost:8500")]
    server: String,

    /// Model to call
    #[arg(long = "model_name", default_value = "default")]
    model_name: String,

    /// Signature to call
    #[arg(long = "signature_name", default_value = DEFAULT_SIGNATURE_NAME)]
    signature_name: String,

    /// Input tensor as name=v1,v2,...; repeatable
    #[arg(long = "input", required = true)]
    inputs: Vec<String>,

    /// Call deadline in milliseconds
    #[arg(long = "timeout_ms")]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modelserver_client=info,predict_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut inputs = HashMap::new();
    for spec in &cli.inputs {
        let (name, tensor) = parse_float_input(spec)?;
        inputs.insert(name, tensor);
    }

    let mut client = PredictionClient::connect(&cli.server)
        .await
        .with_context(|| format!("connecting to {}", cli.server))?;
    info!("Connected to {}", client.endpoint());

    let response = client
        .predict(
            &cli.model_name,
            &cli.signature_name,
            inputs,
            cli.timeout_ms.map(Duration::from_millis),
        )
        .await
        .with_context(|| format!("Predict on {} failed", client.endpoint()))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

//! Writes a multi-model config file for every servable under a directory

use clap::Parser;
use modelserver_common::config::ModelServerConfig;
use modelserver_common::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "make-model-config")]
#[command(about = "Generate a --model_config_file from a servables directory", long_about = None)]
struct Cli {
    /// Directory whose subdirectories are model roots
    #[arg(long = "servables_dir")]
    servables_dir: PathBuf,

    /// Only include model roots whose name contains this string
    #[arg(long)]
    filter: Option<String>,

    /// Output file; printed to stdout when unset
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modelserver_common=info,make_model_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ModelServerConfig::from_servables_dir(&cli.servables_dir, cli.filter.as_deref())?;
    let rendered = config.to_yaml()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!(
                "Wrote {} model(s) to {}",
                config.model_config_list.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

//! CLI подготовки данных

use anyhow::Context;
use clap::Parser;

use satisfaction_prep::{run, Args, PipelineConfig};

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "satisfaction_prep=info".into()),
        )
        .init();

    let config = PipelineConfig::from(Args::parse());
    let output = run(&config)
        .with_context(|| format!("data preparation failed for {}", config.raw_data.display()))?;

    println!("Raw data is saved in the directory: {}", output.raw_dir.display());
    println!("Processed data is saved in the directory: {}", output.processed_dir.display());
    Ok(())
}

//! Worksheet Hints
//!
//! Offline driver: pairs a worksheet photo with a recorded model reply and
//! prints the resulting problems and hint frames as JSON.
//!
//! Usage: worksheet_hints <image> <recorded-reply> [config.json]

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::info;

use worksheet_hints::analysis::{ImageUpload, ReplayExtractor};
use worksheet_hints::config::ConfigManager;
use worksheet_hints::WorksheetAnalyzer;

const DEFAULT_CONFIG_FILE: &str = "worksheet_hints.json";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (image_path, reply_path) = match args.as_slice() {
        [image, reply, ..] => (image.clone(), reply.clone()),
        _ => bail!("usage: worksheet_hints <image> <recorded-reply> [config.json]"),
    };
    let config_path = args.get(2).cloned().unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let mut config = ConfigManager::new(&config_path).load().await?;
    config.apply_env();

    // Logs go to stderr; stdout carries the worksheet JSON
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Using config '{}' (model {})", config_path, config.model);

    let image = ImageUpload::from_file(&image_path).await?;
    let analyzer = config.configure(WorksheetAnalyzer::new(Arc::new(ReplayExtractor::new(reply_path))));

    let worksheet = analyzer.analyze(image).await?;
    let json = serde_json::to_string_pretty(&worksheet).context("Failed to serialize worksheet")?;
    println!("{}", json);

    Ok(())
}

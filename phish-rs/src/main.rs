//! CLI entry point: analyze one page snapshot and print the verdict as JSON.
//!
//! ```bash
//! phish-rs --config config.toml snapshot.json
//! ```

use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use phish_rs::analysis::PhishingDetector;
use phish_rs::config::Config;
use phish_rs::features::{FeatureExtractor, StatisticalReporter};
use phish_rs::inference::ModelBackend;
use phish_rs::scaler::ScalerConfig;
use phish_rs::snapshot::PageSnapshot;

#[derive(Parser)]
#[command(name = "phish-rs")]
#[command(about = "Score a page snapshot for phishing risk", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Snapshot JSON file produced by a page collector
    snapshot: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if std::path::Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    let level = match config.logging.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let builder = FmtSubscriber::builder().with_max_level(level);
    if config.logging.format == "pretty" {
        tracing::subscriber::set_global_default(builder.pretty().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!("Starting phish-rs");

    // Scaler parameters are mandatory; without them the feature vector
    // cannot be built.
    let scaler = Arc::new(ScalerConfig::load(
        &config.scaler.params_path,
        &config.scaler.feature_info_path,
    )?);

    // The model is not: a load failure degrades to the heuristic fallback.
    let backend = match ModelBackend::load(&config.model) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            warn!("Model backend unavailable, falling back to heuristics: {e}");
            None
        }
    };

    let detector = PhishingDetector::new(
        FeatureExtractor::new()?,
        StatisticalReporter::new()?,
        scaler,
        backend,
    );

    let payload = std::fs::read_to_string(&cli.snapshot)?;
    let snapshot = PageSnapshot::from_json(&payload)?;
    let result = detector.analyze(&snapshot).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

//! Crop Advisor - Main Entry Point
//!
//! One-shot recommendations and analysis from the command line, or a NATS
//! request/reply service.

use anyhow::{bail, Context, Result};
use clap::Parser;
use crop_advisor::{
    cli::{Cli, Commands},
    config::{AppConfig, LogFormat, LoggingConfig},
    consumer::RequestConsumer,
    crops::{encyclopedia, render_card, Crop},
    dashboard::Dashboard,
    metrics::{MetricsReporter, ServiceMetrics},
    models::{ArtifactCache, ModelState},
    producer::ReplyPublisher,
    service::RecommendationService,
    types::SoilReading,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_path(&cli.config)?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Predict { reading, json } => predict(&config, SoilReading::from(&reading), json),
        Commands::Analyze { reading, json } => analyze(SoilReading::from(&reading), json),
        Commands::Crops { name } => crops(name.as_deref()),
        Commands::Serve => serve(config).await,
    }
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("crop_advisor={}", config.level).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
    Ok(())
}

fn predict(config: &AppConfig, reading: SoilReading, json: bool) -> Result<()> {
    let cache = ArtifactCache::new(config.models.clone());

    if let ModelState::Disabled { reason } = cache.state() {
        bail!(
            "{reason}\nPlease ensure '{}' and '{}' exist.",
            config.models.classifier_path.display(),
            config.models.scaler_path.display()
        );
    }

    let recommendation = cache.recommend(&reading)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print!("{}", recommendation.render());
    }
    Ok(())
}

fn analyze(reading: SoilReading, json: bool) -> Result<()> {
    reading.validate()?;
    let dashboard = Dashboard::build(&reading);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", dashboard.render());
    }
    Ok(())
}

fn crops(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let crop = Crop::from_name(name).with_context(|| format!("Unknown crop: {name}"))?;
            print!("{}", render_card(crop.name(), crop.info()));
        }
        None => {
            println!("Crop Encyclopedia\n");
            for (crop, info) in encyclopedia() {
                println!("{}", render_card(crop.name(), Some(info)));
            }
        }
    }
    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting Crop Advisor service");

    let cache = Arc::new(ArtifactCache::new(config.models.clone()));
    // load up front so the first request does not pay for it
    match cache.state() {
        ModelState::Ready(engine) => {
            info!(classifier = %engine.classifier_name(), "Model artifacts ready")
        }
        ModelState::Disabled { reason } => info!(reason = %reason, "Prediction disabled"),
    }

    let metrics = Arc::new(ServiceMetrics::new());
    if config.service.metrics_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.service.metrics_interval_secs);
        tokio::spawn(reporter.start());
    }

    let client = async_nats::connect(&config.nats.url)
        .await
        .with_context(|| format!("Failed to connect to NATS at {}", config.nats.url))?;
    info!("Connected to NATS at {}", config.nats.url);

    let consumer = RequestConsumer::new(client.clone(), &config.nats.request_subject);
    let publisher = ReplyPublisher::new(client, &config.nats.response_subject);
    info!(
        requests = %consumer.subject(),
        fallback_replies = %publisher.fallback_subject(),
        "Listening for recommendation requests"
    );

    let service = RecommendationService::new(cache, metrics.clone());
    service.run(&consumer, &publisher).await?;

    info!("Service shutting down...");
    metrics.print_summary();
    Ok(())
}

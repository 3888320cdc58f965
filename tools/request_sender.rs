//! Test Request Sender
//!
//! Generates soil readings and sends them to the recommendation service over
//! NATS, logging each reply.

use crop_advisor::types::{SoilReading, FEATURE_BOUNDS};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Reading generator for testing
struct ReadingGenerator {
    rng: rand::rngs::ThreadRng,
}

impl ReadingGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Paddy-field conditions
    fn reference() -> SoilReading {
        SoilReading::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9)
    }

    /// Uniform reading across the accepted ranges, pH in 0.1 steps
    fn generate(&mut self) -> SoilReading {
        let mut values = [0.0; 7];
        for (value, bounds) in values.iter_mut().zip(FEATURE_BOUNDS.iter()) {
            *value = self.rng.gen_range(bounds.min..=bounds.max);
        }
        values[5] = (values[5] * 10.0).round() / 10.0;

        let [n, p, k, temperature, humidity, ph, rainfall] = values;
        SoilReading::new(n, p, k, temperature, humidity, ph, rainfall)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("request_sender=info".parse()?),
        )
        .init();

    info!("Starting Test Request Sender");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let nats_url = args.get(1).map(|s| s.as_str()).unwrap_or("nats://localhost:4222");
    let subject = args.get(2).map(|s| s.as_str()).unwrap_or("crop.recommend");
    let count: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(250);

    info!(
        nats_url = %nats_url,
        subject = %subject,
        count = count,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    let client = match async_nats::connect(nats_url).await {
        Ok(c) => {
            info!("Connected to NATS");
            c
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to NATS. Running in dry-run mode.");
            return run_dry_mode(count, delay_ms).await;
        }
    };

    let mut generator = ReadingGenerator::new();
    let mut answered = 0;

    for i in 0..count {
        // the first request is always the reference reading
        let reading = if i == 0 {
            ReadingGenerator::reference()
        } else {
            generator.generate()
        };

        let payload = serde_json::to_vec(&reading)?;

        match client.request(subject.to_string(), payload.into()).await {
            Ok(message) => {
                answered += 1;
                let reply: serde_json::Value = serde_json::from_slice(&message.payload)?;
                info!(
                    request = i + 1,
                    status = %reply["status"],
                    crop = %reply["crop"],
                    "Reply received"
                );
            }
            Err(e) => warn!(request = i + 1, error = %e, "Request failed"),
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!("Completed! Sent {} requests, {} answered", count, answered);

    Ok(())
}

async fn run_dry_mode(count: u64, delay_ms: u64) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no NATS connection)");

    let mut generator = ReadingGenerator::new();

    for i in 0..count {
        let reading = if i == 0 {
            ReadingGenerator::reference()
        } else {
            generator.generate()
        };

        let json = serde_json::to_string_pretty(&reading)?;
        info!("Sample request {}:\n{}", i + 1, json);

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    Ok(())
}

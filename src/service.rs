//! Request/reply recommendation service over NATS.
//!
//! Requests are handled one at a time in arrival order. Each request is a
//! JSON [`SoilReading`]; each reply is a JSON [`RecommendationReply`].

use crate::consumer::RequestConsumer;
use crate::metrics::ServiceMetrics;
use crate::models::ArtifactCache;
use crate::producer::ReplyPublisher;
use crate::types::{RecommendationReply, SoilReading};
use anyhow::Result;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Recommendation service bound to a cached engine
pub struct RecommendationService {
    cache: Arc<ArtifactCache>,
    metrics: Arc<ServiceMetrics>,
}

impl RecommendationService {
    pub fn new(cache: Arc<ArtifactCache>, metrics: Arc<ServiceMetrics>) -> Self {
        Self { cache, metrics }
    }

    pub fn metrics(&self) -> &Arc<ServiceMetrics> {
        &self.metrics
    }

    /// Decode one request payload and produce its reply.
    pub fn handle(&self, payload: &[u8]) -> RecommendationReply {
        let start_time = Instant::now();

        // Decode and run inference
        let reply = match serde_json::from_slice::<SoilReading>(payload) {
            Ok(reading) => RecommendationReply::from(self.cache.recommend(&reading)),
            Err(e) => {
                warn!(error = %e, "Failed to deserialize request");
                RecommendationReply::malformed(format!("Invalid request payload: {}", e))
            }
        };

        // Record processing time
        let processing_time = start_time.elapsed();
        self.metrics.record_request(processing_time, &reply);

        match &reply {
            RecommendationReply::Ok(rec) => info!(
                request_id = %rec.request_id,
                label = rec.label,
                crop = %rec.crop,
                processing_time_us = processing_time.as_micros(),
                "Recommendation served"
            ),
            RecommendationReply::Error { kind, message } => debug!(
                kind = %kind,
                message = %message,
                "Request refused"
            ),
        }

        reply
    }

    /// Answer requests until the subscription ends.
    pub async fn run(&self, consumer: &RequestConsumer, publisher: &ReplyPublisher) -> Result<()> {
        if !self.cache.state().is_ready() {
            warn!("Model artifacts unavailable; every request will receive an error reply");
        }

        let mut subscription = consumer.subscribe().await?;

        while let Some(message) = subscription.next().await {
            let reply = self.handle(&message.payload);

            // Reply to the inbox, or the fallback subject
            if let Err(e) = publisher.publish(message.reply.clone(), &reply).await {
                error!(
                    subject = %message.subject,
                    error = %e,
                    "Failed to publish reply"
                );
            }
        }

        info!("Request subscription closed");
        Ok(())
    }
}

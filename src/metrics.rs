//! Request statistics for service mode.

use crate::types::RecommendationReply;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Processing times kept for percentile calculation
const MAX_SAMPLES: usize = 10_000;

/// Metrics collector for the recommendation service
pub struct ServiceMetrics {
    /// Requests answered, whatever the outcome
    pub requests_handled: AtomicU64,
    /// Requests answered with a recommendation
    pub recommendations: AtomicU64,
    /// Requests refused for malformed payloads or out-of-range values
    pub rejected: AtomicU64,
    /// Requests that failed in the model or found it unavailable
    pub failed: AtomicU64,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Recommendations per crop name
    by_crop: RwLock<HashMap<String, u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            requests_handled: AtomicU64::new(0),
            recommendations: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            by_crop: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record one answered request
    pub fn record_request(&self, processing_time: Duration, reply: &RecommendationReply) {
        self.requests_handled.fetch_add(1, Ordering::Relaxed);

        // Record processing time
        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            if times.len() > MAX_SAMPLES {
                times.drain(0..MAX_SAMPLES / 2);
            }
        }

        // Classify outcome
        match reply {
            RecommendationReply::Ok(rec) => {
                self.recommendations.fetch_add(1, Ordering::Relaxed);
                if let Ok(mut by_crop) = self.by_crop.write() {
                    *by_crop.entry(rec.crop.to_string()).or_insert(0) += 1;
                }
            }
            RecommendationReply::Error { kind, .. } => {
                if kind.is_rejection() {
                    self.rejected.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self
            .processing_times
            .read()
            .unwrap_or_else(|e| e.into_inner());
        if times.is_empty() {
            return ProcessingStats::default();
        }

        // Calculate percentiles
        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();
        let at = |q: f64| sorted[((count as f64 * q) as usize).min(count - 1)];

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: at(0.95),
            p99_us: at(0.99),
            max_us: sorted[count - 1],
        }
    }

    /// Get current throughput (requests per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.requests_handled.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Recommendations per crop, most frequent first
    pub fn get_by_crop(&self) -> Vec<(String, u64)> {
        let by_crop = self.by_crop.read().unwrap_or_else(|e| e.into_inner());
        let mut counts: Vec<(String, u64)> =
            by_crop.iter().map(|(k, v)| (k.clone(), *v)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let handled = self.requests_handled.load(Ordering::Relaxed);
        let recommendations = self.recommendations.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let processing = self.get_processing_stats();

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║              CROP ADVISOR SERVICE - METRICS SUMMARY          ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Requests Handled: {:>8}  │  Throughput: {:>8.2} req/s   ║",
            handled,
            self.get_throughput()
        );
        info!(
            "║ Recommended: {:>8}  Rejected: {:>8}  Failed: {:>8}   ║",
            recommendations, rejected, failed
        );
        info!(
            "║ Processing Time (μs): mean={:>5} p50={:>5} p95={:>5} p99={:>5} ║",
            processing.mean_us, processing.p50_us, processing.p95_us, processing.p99_us
        );
        // Crop distribution
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Recommendations by Crop:                                     ║");
        for (crop, count) in self.get_by_crop() {
            let pct = if recommendations > 0 {
                (count as f64 / recommendations as f64) * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
            info!("║   {:12}: {:>6} ({:>5.1}%) {}", crop, count, pct, bar);
        }
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Periodic summary printer
pub struct MetricsReporter {
    metrics: Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
        // the first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendError;
    use crate::types::{Recommendation, SoilReading};

    #[test]
    fn test_metrics_recording() {
        let metrics = ServiceMetrics::new();

        let ok = RecommendationReply::Ok(Recommendation::from_label(1, SoilReading::default()));
        let invalid = RecommendationReply::from_error(&RecommendError::InvalidInput {
            field: "ph",
            value: 20.0,
            min: 0.0,
            max: 14.0,
        });
        let failed = RecommendationReply::from_error(&RecommendError::prediction("boom"));

        metrics.record_request(Duration::from_micros(100), &ok);
        metrics.record_request(Duration::from_micros(300), &ok);
        metrics.record_request(Duration::from_micros(200), &invalid);
        metrics.record_request(Duration::from_micros(50), &failed);

        assert_eq!(metrics.requests_handled.load(Ordering::Relaxed), 4);
        assert_eq!(metrics.recommendations.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rejected.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.get_by_crop(), vec![("Rice".to_string(), 2)]);
    }

    #[test]
    fn test_outcomes_follow_error_kind() {
        let metrics = ServiceMetrics::new();

        let replies = [
            RecommendationReply::malformed("bad json"),
            RecommendationReply::from_error(&RecommendError::Unavailable("no model".into())),
            RecommendationReply::from_error(&RecommendError::ArtifactsMissing {
                path: "models/scaler.json".into(),
            }),
        ];
        for reply in &replies {
            metrics.record_request(Duration::from_micros(10), reply);
        }

        assert_eq!(metrics.rejected.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.failed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.recommendations.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_processing_stats() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.get_processing_stats().count, 0);

        let reply = RecommendationReply::malformed("bad json");
        for us in [10, 20, 30, 40] {
            metrics.record_request(Duration::from_micros(us), &reply);
        }

        let stats = metrics.get_processing_stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean_us, 25);
        assert_eq!(stats.p50_us, 30);
        assert_eq!(stats.max_us, 40);
    }
}

//! Parameter analysis for a reading: per-input gauges and a radar profile.

use crate::types::reading::{FeatureBounds, SoilReading, FEATURE_BOUNDS};
use serde::Serialize;
use std::fmt::Write;

/// Fraction of the axis maximum where the medium band starts
const MEDIUM_BAND: f64 = 0.3;
/// Fraction of the axis maximum where the high band starts
const HIGH_BAND: f64 = 0.7;
/// Fraction of the axis maximum drawn as the alert line
const ALERT_LINE: f64 = 0.9;
/// Width of rendered bars, in cells
const BAR_WIDTH: usize = 30;

/// Gauge band a value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    Low,
    Medium,
    High,
}

/// One input plotted against its accepted range
#[derive(Debug, Clone, Serialize)]
pub struct ParameterGauge {
    pub title: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Signed distance from the range midpoint
    pub delta: f64,
    pub band: GaugeBand,
    /// Value is at or above 90% of the axis maximum
    pub above_alert_line: bool,
}

impl ParameterGauge {
    pub fn new(title: &'static str, value: f64, bounds: &FeatureBounds) -> Self {
        let band = if value < bounds.max * MEDIUM_BAND {
            GaugeBand::Low
        } else if value < bounds.max * HIGH_BAND {
            GaugeBand::Medium
        } else {
            GaugeBand::High
        };

        Self {
            title,
            value,
            min: bounds.min,
            max: bounds.max,
            delta: value - bounds.midpoint(),
            band,
            above_alert_line: value >= bounds.max * ALERT_LINE,
        }
    }

    /// Position of the value along the axis, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// One spoke of the radar chart
#[derive(Debug, Clone, Serialize)]
pub struct RadarPoint {
    pub category: &'static str,
    /// Value on a shared 0..100 axis
    pub value: f64,
}

/// Put every input on a common 0..100 axis.
///
/// pH is multiplied by 10 and rainfall divided by 3; the others are used as-is.
pub fn radar_profile(reading: &SoilReading) -> Vec<RadarPoint> {
    let spokes = [
        ("Nitrogen", reading.nitrogen),
        ("Phosphorus", reading.phosphorus),
        ("Potassium", reading.potassium),
        ("Temperature", reading.temperature),
        ("Humidity", reading.humidity),
        ("pH", reading.ph * 10.0),
        ("Rainfall", reading.rainfall / 3.0),
    ];

    spokes
        .into_iter()
        .map(|(category, value)| RadarPoint { category, value })
        .collect()
}

/// Gauges and radar profile for one reading
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub gauges: Vec<ParameterGauge>,
    pub radar: Vec<RadarPoint>,
}

impl Dashboard {
    pub fn build(reading: &SoilReading) -> Self {
        const TITLES: [&str; 7] = [
            "Nitrogen (N)",
            "Phosphorus (P)",
            "Potassium (K)",
            "Temperature (°C)",
            "Humidity (%)",
            "pH Level",
            "Rainfall (mm)",
        ];

        let gauges = TITLES
            .into_iter()
            .zip(FEATURE_BOUNDS.iter())
            .zip(reading.values())
            .map(|((title, bounds), value)| ParameterGauge::new(title, value, bounds))
            .collect();

        Self {
            gauges,
            radar: radar_profile(reading),
        }
    }

    /// Plain-text rendering with bar gauges.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Parameter Analysis");
        let _ = writeln!(out, "{}", "─".repeat(72));
        for gauge in &self.gauges {
            let filled = (gauge.fill_ratio() * BAR_WIDTH as f64).round() as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
            let _ = writeln!(
                out,
                "{:<18} {} {:>7.1} / {:<5} {:<6} {:+.1}{}",
                gauge.title,
                bar,
                gauge.value,
                gauge.max,
                format!("{:?}", gauge.band).to_lowercase(),
                gauge.delta,
                if gauge.above_alert_line { "  !" } else { "" }
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Radar Profile (0-100)");
        let _ = writeln!(out, "{}", "─".repeat(72));
        for point in &self.radar {
            let filled = ((point.value / 100.0).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
            let _ = writeln!(
                out,
                "{:<12} {:<30} {:>6.1}",
                point.category,
                "█".repeat(filled),
                point.value
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_bands() {
        let bounds = FEATURE_BOUNDS[0]; // nitrogen, max 140
        assert_eq!(ParameterGauge::new("N", 10.0, &bounds).band, GaugeBand::Low);
        assert_eq!(ParameterGauge::new("N", 50.0, &bounds).band, GaugeBand::Medium);
        assert_eq!(ParameterGauge::new("N", 98.0, &bounds).band, GaugeBand::High);
    }

    #[test]
    fn test_gauge_delta_and_alert_line() {
        let bounds = FEATURE_BOUNDS[5]; // ph, 0..14
        let gauge = ParameterGauge::new("pH", 6.5, &bounds);
        assert!((gauge.delta + 0.5).abs() < 1e-9);
        assert!(!gauge.above_alert_line);

        let gauge = ParameterGauge::new("pH", 13.0, &bounds);
        assert!(gauge.above_alert_line);
        assert_eq!(gauge.band, GaugeBand::High);
        assert!((gauge.fill_ratio() - 13.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_radar_normalization() {
        let reading = SoilReading::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9);
        let radar = radar_profile(&reading);

        assert_eq!(radar.len(), 7);
        assert_eq!(radar[0].value, 90.0);
        assert!((radar[5].value - 65.0).abs() < 1e-9);
        assert!((radar[6].value - 202.9 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_dashboard_render() {
        let dashboard = Dashboard::build(&SoilReading::default());
        assert_eq!(dashboard.gauges.len(), 7);

        let text = dashboard.render();
        assert!(text.contains("Nitrogen (N)"));
        assert!(text.contains("Radar Profile"));
        assert!(text.contains("Rainfall"));
    }
}

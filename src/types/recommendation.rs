//! Recommendation results and service replies

use crate::crops::{crop_name, render_card, Crop, CropInfo};
use crate::error::{ErrorKind, RecommendError};
use crate::types::reading::SoilReading;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Crop recommended for one reading
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Unique request identifier
    pub request_id: String,

    /// Raw classifier label
    pub label: i64,

    /// Crop name, or "Unknown" when the label is outside the table
    pub crop: &'static str,

    /// Growing information when the encyclopedia has an entry
    pub info: Option<&'static CropInfo>,

    /// Reading the recommendation was made for
    pub reading: SoilReading,

    /// Generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    /// Build a recommendation from a classifier label.
    pub fn from_label(label: i64, reading: SoilReading) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            label,
            crop: crop_name(label),
            info: Crop::from_label(label).and_then(Crop::info),
            reading,
            timestamp: Utc::now(),
        }
    }

    /// Whether the label resolved to a known crop.
    pub fn is_known(&self) -> bool {
        Crop::from_label(self.label).is_some()
    }

    /// Result panel shown to the user.
    pub fn render(&self) -> String {
        let mut out = String::from("Optimal Crop Recommendation\n\n");
        out.push_str(&render_card(self.crop, self.info));
        out
    }
}

/// Reply published for each service request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecommendationReply {
    Ok(Recommendation),
    Error { kind: ErrorKind, message: String },
}

impl RecommendationReply {
    /// Build an error reply from a pipeline error.
    pub fn from_error(err: &RecommendError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Build an error reply for a payload that could not be decoded.
    pub fn malformed(message: impl ToString) -> Self {
        Self::Error {
            kind: ErrorKind::MalformedRequest,
            message: message.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Failure class of an error reply.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ok(_) => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }
}

impl From<Result<Recommendation, RecommendError>> for RecommendationReply {
    fn from(result: Result<Recommendation, RecommendError>) -> Self {
        match result {
            Ok(recommendation) => Self::Ok(recommendation),
            Err(e) => Self::from_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_label_carries_info() {
        let rec = Recommendation::from_label(1, SoilReading::default());
        assert_eq!(rec.crop, "Rice");
        assert!(rec.is_known());
        assert!(rec.info.is_some());
        assert!(rec.render().contains("Kharif (Jun-Oct)"));
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let rec = Recommendation::from_label(999, SoilReading::default());
        assert_eq!(rec.crop, "Unknown");
        assert!(!rec.is_known());
        assert!(rec.info.is_none());
        assert!(rec.render().contains("No detailed information"));
    }

    #[test]
    fn test_known_crop_without_info() {
        let rec = Recommendation::from_label(3, SoilReading::default());
        assert_eq!(rec.crop, "Jute");
        assert!(rec.is_known());
        assert!(rec.info.is_none());
    }

    #[test]
    fn test_reply_serialization() {
        let reply = RecommendationReply::Ok(Recommendation::from_label(22, SoilReading::default()));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["crop"], "Coffee");
        assert_eq!(json["info"]["icon"], "☕");

        let reply = RecommendationReply::from_error(&RecommendError::prediction("shape mismatch"));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "prediction_failed");

        let json = serde_json::to_value(RecommendationReply::malformed("bad json")).unwrap();
        assert_eq!(json["kind"], "malformed_request");
    }

    #[test]
    fn test_error_kind_of_reply() {
        let ok = RecommendationReply::Ok(Recommendation::from_label(1, SoilReading::default()));
        assert_eq!(ok.error_kind(), None);
        assert_eq!(
            RecommendationReply::malformed("bad json").error_kind(),
            Some(ErrorKind::MalformedRequest)
        );
    }
}

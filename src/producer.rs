//! NATS publisher for recommendation replies

use crate::types::RecommendationReply;
use anyhow::Result;
use async_nats::{Client, Subject};
use tracing::debug;

/// Publisher for recommendation replies
#[derive(Clone)]
pub struct ReplyPublisher {
    client: Client,
    fallback_subject: String,
}

impl ReplyPublisher {
    /// Create a publisher; `fallback_subject` receives replies to requests
    /// that carry no reply inbox.
    pub fn new(client: Client, fallback_subject: &str) -> Self {
        Self {
            client,
            fallback_subject: fallback_subject.to_string(),
        }
    }

    /// Publish a reply to the request's inbox, or to the fallback subject
    pub async fn publish(&self, reply_to: Option<Subject>, reply: &RecommendationReply) -> Result<()> {
        let payload = serde_json::to_vec(reply)?;
        let subject = reply_to.unwrap_or_else(|| Subject::from(self.fallback_subject.as_str()));

        debug!(subject = %subject, ok = reply.is_ok(), "Publishing reply");

        self.client.publish(subject, payload.into()).await?;
        Ok(())
    }

    /// Get the fallback subject name
    pub fn fallback_subject(&self) -> &str {
        &self.fallback_subject
    }
}

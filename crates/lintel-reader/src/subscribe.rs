//! Mailing-list subscription client.
//!
//! The subscription backend is an opaque POST endpoint; it never returns
//! a readable body, so a completed request counts as success.

use chrono::Utc;
use regex::Regex;
use serde::Serialize;

use crate::ReaderError;

/// Check that an address looks like an email. Intentionally loose:
/// something, an `@`, something, a dot, something.
pub fn validate_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern");
    re.is_match(&email.to_lowercase())
}

#[derive(Debug, Serialize)]
struct SubscriptionRequest<'a> {
    email: &'a str,
    source: &'a str,
    timestamp: String,
    page: &'a str,
}

/// Client for the subscription endpoint.
pub struct SubscriptionClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SubscriptionClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ReaderError> {
        let client = reqwest::Client::builder()
            .user_agent("lintel/0.1")
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Submit one subscription. The email is validated first; the POST is
    /// fire-and-forget — the response body is never read.
    pub async fn subscribe(
        &self,
        email: &str,
        source: &str,
        page: &str,
    ) -> Result<(), ReaderError> {
        let email = email.trim();
        if !validate_email(email) {
            return Err(ReaderError::InvalidEmail);
        }

        let request = SubscriptionRequest {
            email,
            source,
            timestamp: Utc::now().to_rfc3339(),
            page,
        };

        self.client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        tracing::info!("subscription submitted for {}", email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("reader@example.com"));
        assert!(validate_email("first.last@sub.example.org"));
        assert!(validate_email("UPPER@EXAMPLE.COM"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.example.com"));
        assert!(!validate_email("two@@example.com"));
        assert!(!validate_email("spaces in@example.com"));
        assert!(!validate_email("nodot@example"));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_any_request() {
        let client = SubscriptionClient::new("https://invalid.example/endpoint").unwrap();
        let err = client
            .subscribe("not-an-email", "novel-platform", "/novels/")
            .await
            .unwrap_err();
        assert!(matches!(err, ReaderError::InvalidEmail));
    }

    #[test]
    fn request_serializes_expected_fields() {
        let request = SubscriptionRequest {
            email: "reader@example.com",
            source: "novel-platform",
            timestamp: "2024-06-01T00:00:00+00:00".to_string(),
            page: "/novels/arc-of-ash/",
        };

        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains(r#""email":"reader@example.com""#));
        assert!(json.contains(r#""source":"novel-platform""#));
        assert!(json.contains(r#""timestamp":"2024-06-01T00:00:00+00:00""#));
        assert!(json.contains(r#""page":"/novels/arc-of-ash/""#));
    }
}

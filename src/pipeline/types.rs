//! Shared types for the email triage pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Email record ────────────────────────────────────────────────────

/// An incoming support email as delivered by the upstream mail source.
///
/// Every field is optional at the type level: upstream payloads may omit
/// keys, and validation is a pure check over these options rather than a
/// key-presence probe. The pipeline only ever borrows a record — it is
/// never mutated after receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Unique, non-empty identifier assigned upstream.
    pub id: Option<String>,
    /// Sender address.
    #[serde(rename = "from")]
    pub from_addr: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Message body.
    pub body: Option<String>,
    /// Receipt time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmailRecord {
    /// True iff all required fields are present.
    ///
    /// Empty strings are accepted — only presence is checked. Pure, no
    /// side effects.
    pub fn is_complete(&self) -> bool {
        self.id.is_some()
            && self.from_addr.is_some()
            && self.subject.is_some()
            && self.body.is_some()
            && self.timestamp.is_some()
    }

    /// Email id, or empty string when the record never carried one.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Body text, or empty string when absent.
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

// ── Category ────────────────────────────────────────────────────────

/// Closed classification vocabulary. No other value is ever a valid
/// classification output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Complaint,
    Inquiry,
    Feedback,
    SupportRequest,
    Other,
}

impl Category {
    /// All categories, in prompt order.
    pub const ALL: [Category; 5] = [
        Category::Complaint,
        Category::Inquiry,
        Category::Feedback,
        Category::SupportRequest,
        Category::Other,
    ];

    /// The wire token for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Complaint => "complaint",
            Category::Inquiry => "inquiry",
            Category::Feedback => "feedback",
            Category::SupportRequest => "support_request",
            Category::Other => "other",
        }
    }

    /// Parse a normalized (trimmed, lowercased) token. Anything outside
    /// the vocabulary is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "complaint" => Some(Category::Complaint),
            "inquiry" => Some(Category::Inquiry),
            "feedback" => Some(Category::Feedback),
            "support_request" => Some(Category::SupportRequest),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// One-line definition used in the classification prompt.
    pub fn definition(&self) -> &'static str {
        match self {
            Category::Complaint => "Emails that express dissatisfaction with a product or service.",
            Category::Inquiry => "Questions about products and services.",
            Category::Feedback => "Positive or neutral messages about products or services.",
            Category::SupportRequest => "Requests for assistance or support.",
            Category::Other => "Emails that do not fit into any of the above categories.",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Processing result ───────────────────────────────────────────────

/// Uniform per-email outcome record. Constructed once, never mutated.
///
/// `success == true` implies `classification` holds a valid category token
/// and `response_sent` is non-empty. On failure both are `None`, except
/// that `classification` may carry the raw out-of-vocabulary token the
/// model produced, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingResult {
    pub email_id: String,
    pub success: bool,
    pub classification: Option<String>,
    pub response_sent: Option<String>,
}

impl ProcessingResult {
    /// Successful outcome.
    pub fn ok(email_id: impl Into<String>, category: Category, response: impl Into<String>) -> Self {
        Self {
            email_id: email_id.into(),
            success: true,
            classification: Some(category.as_str().to_string()),
            response_sent: Some(response.into()),
        }
    }

    /// Failure outcome. `classification` carries the raw model token when
    /// one exists (diagnostic passthrough), otherwise `None`.
    pub fn failed(email_id: impl Into<String>, classification: Option<String>) -> Self {
        Self {
            email_id: email_id.into(),
            success: false,
            classification,
            response_sent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> EmailRecord {
        EmailRecord {
            id: Some("001".into()),
            from_addr: Some("customer@example.com".into()),
            subject: Some("Broken product".into()),
            body: Some("It arrived damaged.".into()),
            timestamp: Some(Utc::now()),
        }
    }

    #[test]
    fn complete_record_is_valid() {
        assert!(complete_record().is_complete());
    }

    #[test]
    fn missing_any_field_is_invalid() {
        let mut missing_subject = complete_record();
        missing_subject.subject = None;
        assert!(!missing_subject.is_complete());

        let mut missing_timestamp = complete_record();
        missing_timestamp.timestamp = None;
        assert!(!missing_timestamp.is_complete());
    }

    #[test]
    fn empty_string_fields_are_still_valid() {
        let mut record = complete_record();
        record.subject = Some(String::new());
        record.body = Some(String::new());
        assert!(record.is_complete());
    }

    #[test]
    fn missing_keys_deserialize_to_none() {
        let record: EmailRecord =
            serde_json::from_str(r#"{"id":"007","from":"a@b.com","body":"hi"}"#).unwrap();
        assert!(record.subject.is_none());
        assert!(record.timestamp.is_none());
        assert!(!record.is_complete());
    }

    #[test]
    fn category_tokens_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn category_parse_rejects_unknown_tokens() {
        assert_eq!(Category::parse("spam"), None);
        assert_eq!(Category::parse("Complaint"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn category_serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::SupportRequest).unwrap();
        assert_eq!(json, "\"support_request\"");
    }

    #[test]
    fn ok_result_holds_category_token_and_response() {
        let result = ProcessingResult::ok("001", Category::Complaint, "We are sorry.");
        assert!(result.success);
        assert_eq!(result.classification.as_deref(), Some("complaint"));
        assert_eq!(result.response_sent.as_deref(), Some("We are sorry."));
    }

    #[test]
    fn failed_result_may_carry_raw_token() {
        let result = ProcessingResult::failed("002", Some("spam".into()));
        assert!(!result.success);
        assert_eq!(result.classification.as_deref(), Some("spam"));
        assert!(result.response_sent.is_none());
    }
}

//! Bundled demo dataset for the triage pipeline.

use chrono::{DateTime, Utc};

use crate::pipeline::types::EmailRecord;

fn record(id: &str, from_addr: &str, subject: &str, body: &str, timestamp: &str) -> EmailRecord {
    EmailRecord {
        id: Some(id.to_string()),
        from_addr: Some(from_addr.to_string()),
        subject: Some(subject.to_string()),
        body: Some(body.to_string()),
        timestamp: timestamp.parse::<DateTime<Utc>>().ok(),
    }
}

/// Five representative support emails, one per expected category.
pub fn sample_emails() -> Vec<EmailRecord> {
    vec![
        record(
            "001",
            "angry.customer@example.com",
            "Broken product received",
            "I received my order #12345 yesterday but it arrived completely damaged. \
             This is unacceptable and I demand a refund immediately. This is the worst \
             customer service I've experienced.",
            "2024-03-15T10:30:00Z",
        ),
        record(
            "002",
            "curious.shopper@example.com",
            "Question about product specifications",
            "Hi, I'm interested in buying your premium package but I couldn't find \
             information about whether it's compatible with Mac OS. Could you please \
             clarify this? Thanks!",
            "2024-03-15T11:45:00Z",
        ),
        record(
            "003",
            "happy.user@example.com",
            "Amazing customer support",
            "I just wanted to say thank you for the excellent support I received from \
             Sarah on your team. She went above and beyond to help resolve my issue. \
             Keep up the great work!",
            "2024-03-15T13:15:00Z",
        ),
        record(
            "004",
            "tech.user@example.com",
            "Need help with installation",
            "I've been trying to install the software for the past hour but keep \
             getting error code 5123. I've already tried restarting my computer and \
             clearing the cache. Please help!",
            "2024-03-15T14:20:00Z",
        ),
        record(
            "005",
            "business.client@example.com",
            "Partnership opportunity",
            "Our company is interested in exploring potential partnership opportunities \
             with your organization. Would it be possible to schedule a call next week \
             to discuss this further?",
            "2024-03-15T15:00:00Z",
        ),
    ]
}

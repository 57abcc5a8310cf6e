//! External collaborator seams — pure I/O, no business logic.
//!
//! The dispatcher calls these fire-and-forget: no payload comes back, and
//! failures are not inspected at the call site (they propagate to the
//! pipeline boundary). The tracing-backed impls stand in for the real
//! ticketing/notification/feedback systems, which are out of scope.

use async_trait::async_trait;
use tracing::info;

use crate::error::DispatchError;
use crate::pipeline::types::Category;

/// Ticket creation in the external ticketing system.
#[async_trait]
pub trait Ticketing: Send + Sync {
    /// Open an urgent ticket tagged with the category, carrying the email
    /// body as context.
    async fn create_urgent_ticket(
        &self,
        email_id: &str,
        category: Category,
        context: &str,
    ) -> Result<(), DispatchError>;

    /// Open a standard support ticket carrying the email body as context.
    async fn create_support_ticket(
        &self,
        email_id: &str,
        context: &str,
    ) -> Result<(), DispatchError>;
}

/// Outbound response transmission.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the response for a complaint.
    async fn send_complaint_response(
        &self,
        email_id: &str,
        response: &str,
    ) -> Result<(), DispatchError>;

    /// Send a standard response.
    async fn send_standard_response(
        &self,
        email_id: &str,
        response: &str,
    ) -> Result<(), DispatchError>;
}

/// Customer feedback capture.
#[async_trait]
pub trait FeedbackLog: Send + Sync {
    /// Record the feedback text for later product review.
    async fn log_customer_feedback(
        &self,
        email_id: &str,
        feedback: &str,
    ) -> Result<(), DispatchError>;
}

// ── Tracing-backed stubs ────────────────────────────────────────────

/// Ticketing stub that only logs.
#[derive(Debug, Default)]
pub struct LoggingTicketing;

#[async_trait]
impl Ticketing for LoggingTicketing {
    async fn create_urgent_ticket(
        &self,
        email_id: &str,
        category: Category,
        _context: &str,
    ) -> Result<(), DispatchError> {
        info!(id = %email_id, category = %category, "Creating urgent ticket");
        Ok(())
    }

    async fn create_support_ticket(
        &self,
        email_id: &str,
        _context: &str,
    ) -> Result<(), DispatchError> {
        info!(id = %email_id, "Creating support ticket");
        Ok(())
    }
}

/// Notifier stub that only logs.
#[derive(Debug, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_complaint_response(
        &self,
        email_id: &str,
        _response: &str,
    ) -> Result<(), DispatchError> {
        info!(id = %email_id, "Sending complaint response");
        Ok(())
    }

    async fn send_standard_response(
        &self,
        email_id: &str,
        _response: &str,
    ) -> Result<(), DispatchError> {
        info!(id = %email_id, "Sending standard response");
        Ok(())
    }
}

/// Feedback log stub that only logs.
#[derive(Debug, Default)]
pub struct LoggingFeedbackLog;

#[async_trait]
impl FeedbackLog for LoggingFeedbackLog {
    async fn log_customer_feedback(
        &self,
        email_id: &str,
        _feedback: &str,
    ) -> Result<(), DispatchError> {
        info!(id = %email_id, "Logging customer feedback");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_stubs_always_succeed() {
        let ticketing = LoggingTicketing;
        let notifier = LoggingNotifier;
        let feedback = LoggingFeedbackLog;

        assert!(ticketing
            .create_urgent_ticket("001", Category::Complaint, "damaged")
            .await
            .is_ok());
        assert!(ticketing.create_support_ticket("004", "error 5123").await.is_ok());
        assert!(notifier.send_complaint_response("001", "sorry").await.is_ok());
        assert!(notifier.send_standard_response("002", "thanks").await.is_ok());
        assert!(feedback.log_customer_feedback("003", "great support").await.is_ok());
    }
}

//! Category dispatch — routes a classified email and its response to the
//! matching side-effecting handler.
//!
//! The routing is an exhaustive match over [`Category`], so adding a
//! category without a handler fails to compile. Collaborator failures are
//! not caught here: they propagate to the pipeline's outer boundary.

use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::pipeline::types::{Category, EmailRecord};
use crate::services::{FeedbackLog, Notifier, Ticketing};

/// Routes (email, category, response) triples to collaborator calls.
pub struct Dispatcher {
    ticketing: Arc<dyn Ticketing>,
    notifier: Arc<dyn Notifier>,
    feedback: Arc<dyn FeedbackLog>,
}

impl Dispatcher {
    pub fn new(
        ticketing: Arc<dyn Ticketing>,
        notifier: Arc<dyn Notifier>,
        feedback: Arc<dyn FeedbackLog>,
    ) -> Self {
        Self {
            ticketing,
            notifier,
            feedback,
        }
    }

    /// Run the handler for the category, side effects in fixed order.
    pub async fn dispatch(
        &self,
        email: &EmailRecord,
        category: Category,
        response: &str,
    ) -> Result<(), DispatchError> {
        let id = email.id_or_empty();
        debug!(id = %id, category = %category, "Dispatching email");

        match category {
            Category::Complaint => {
                self.ticketing
                    .create_urgent_ticket(id, Category::Complaint, email.body_or_empty())
                    .await?;
                self.notifier.send_complaint_response(id, response).await?;
            }
            Category::Inquiry => {
                self.notifier.send_standard_response(id, response).await?;
            }
            Category::Feedback => {
                self.feedback
                    .log_customer_feedback(id, email.body_or_empty())
                    .await?;
                self.notifier.send_standard_response(id, response).await?;
            }
            Category::SupportRequest => {
                self.ticketing
                    .create_support_ticket(id, email.body_or_empty())
                    .await?;
                self.notifier.send_standard_response(id, response).await?;
            }
            Category::Other => {
                self.notifier.send_standard_response(id, response).await?;
            }
        }

        Ok(())
    }
}

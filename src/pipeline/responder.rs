//! Response generation — per-category template fill plus one refinement
//! completion.
//!
//! The template carries the factual skeleton (issue/ticket numbers,
//! promises); the refinement pass only adjusts tone and wording. The model
//! is told to use nothing beyond the email body and to leave no
//! placeholder tokens behind.

use std::sync::Arc;

use tracing::{debug, error};

use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::types::{Category, EmailRecord};

/// Max tokens for the refinement call (3-4 sentences expected).
const REFINE_MAX_TOKENS: u32 = 256;

/// Temperature for refinement.
const REFINE_TEMPERATURE: f32 = 0.3;

/// Generates tone-adjusted replies from per-category templates.
pub struct Responder {
    llm: Arc<dyn LlmProvider>,
}

impl Responder {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Fill the category template and refine it with one completion.
    ///
    /// Transport failures and empty refinements are absorbed here: logged
    /// with the email id, surfaced as `None`. A `Some` return is always
    /// non-empty.
    pub async fn generate(&self, email: &EmailRecord, category: Category) -> Option<String> {
        let template = fill_template(category, email.id_or_empty());

        let request = CompletionRequest::new(vec![ChatMessage::user(build_refine_prompt(
            email.body_or_empty(),
            category,
            &template,
        ))])
        .with_temperature(REFINE_TEMPERATURE)
        .with_max_tokens(REFINE_MAX_TOKENS);

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(id = %email.id_or_empty(), error = %e, "Response refinement call failed");
                return None;
            }
        };

        let refined = response.content.trim().to_string();
        if refined.is_empty() {
            error!(id = %email.id_or_empty(), "Refinement returned empty text");
            return None;
        }

        debug!(id = %email.id_or_empty(), category = %category, "Response generated");
        Some(refined)
    }
}

/// Fixed per-category template with the email id substituted.
fn fill_template(category: Category, email_id: &str) -> String {
    match category {
        Category::Complaint => format!(
            "Dear customer,\n\nWe apologize for the poor experience you had with the product \
             you received. Your issue number is {email_id}. One of our team members is looking \
             into it and you will have a proper resolution within the next 24 hours.\n\n\
             Thank you for your patience."
        ),
        Category::Inquiry => "Dear customer,\n\nThank you for contacting us. One of our team \
             members will get back to you with an answer to your question soon.\n\n\
             Best regards."
            .to_string(),
        Category::Feedback => "Dear customer,\n\nWe appreciate the time you took to share your \
             feedback. It helps us improve our products so that we can serve you best.\n\n\
             Thank you."
            .to_string(),
        Category::SupportRequest => format!(
            "Dear customer,\n\nWe received your request. Your support ticket number is \
             support-{email_id} and a member of the technical team will reach out to you with \
             a proper response to your issue.\n\nThank you for your patience."
        ),
        Category::Other => "Dear customer,\n\nWe are processing your message and, if needed, \
             you will get a response shortly.\n\nThank you."
            .to_string(),
    }
}

/// Build the refinement prompt from body, classification, and the filled
/// template.
fn build_refine_prompt(body: &str, category: Category, template: &str) -> String {
    format!(
        "You are an experienced customer support agent. Take the following response \
         template and enhance it based on the email content and its classification.\n\n\
         Email content:\n{body}\n\n\
         Classification: {category}\n\n\
         Response template:\n{template}\n\n\
         Keep the tone of the original template and use empathetic language. \
         Be professional and concise (max 3-4 sentences). \
         DO NOT add any placeholders like [NAME] or [PRODUCT]. \
         Only use information from the body of the email."
    )
}

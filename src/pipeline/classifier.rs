//! Email classification — one LLM completion mapped onto the closed
//! category vocabulary.
//!
//! The model is an untrusted oracle: whatever it returns is normalized and
//! checked against [`Category`] before anything downstream sees it. An
//! out-of-vocabulary answer degrades to a failure signal, never to a
//! silent miscategorization.

use std::sync::Arc;

use tracing::{debug, error};

use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::types::{Category, EmailRecord};

/// Max tokens for the classification call (one category token expected).
const CLASSIFY_MAX_TOKENS: u32 = 16;

/// Temperature for classification (deterministic-ish).
const CLASSIFY_TEMPERATURE: f32 = 0.0;

/// Outcome of a classification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The model answered with a vocabulary member.
    Category(Category),
    /// The model answered with something outside the vocabulary; the
    /// normalized raw token is kept for diagnostics only.
    Unrecognized(String),
    /// Transport/API failure — already logged, nothing to report.
    Failed,
}

/// Classifies email bodies with a single completion per email.
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify an email body into the closed category set.
    ///
    /// Transport failures are absorbed here: they are logged with the
    /// email id and surface as [`Classification::Failed`], never as an
    /// error to the caller.
    pub async fn classify(&self, email: &EmailRecord) -> Classification {
        let request = CompletionRequest::new(vec![ChatMessage::user(build_classify_prompt(
            email.body_or_empty(),
        ))])
        .with_temperature(CLASSIFY_TEMPERATURE)
        .with_max_tokens(CLASSIFY_MAX_TOKENS);

        let response = match self.llm.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(id = %email.id_or_empty(), error = %e, "Classification call failed");
                return Classification::Failed;
            }
        };

        let normalized = response.content.trim().to_lowercase();
        match Category::parse(&normalized) {
            Some(category) => {
                debug!(id = %email.id_or_empty(), category = %category, "Email classified");
                Classification::Category(category)
            }
            None => {
                error!(
                    id = %email.id_or_empty(),
                    raw = %normalized,
                    "Classifier returned a token outside the category set"
                );
                Classification::Unrecognized(normalized)
            }
        }
    }
}

/// Build the classification prompt. Embeds only the email body.
fn build_classify_prompt(body: &str) -> String {
    let mut prompt = String::with_capacity(512);
    prompt.push_str(
        "You are an expert customer service representative. \
         Classify the following email into exactly one of these categories:\n\n",
    );
    for category in Category::ALL {
        prompt.push_str(&format!("- {}: {}\n", category.as_str(), category.definition()));
    }
    prompt.push_str("\nEmail content:\n");
    prompt.push_str(body);
    prompt.push_str(
        "\n\nRespond with ONLY the category name from the list above. \
         Do not include any additional information.",
    );
    prompt
}

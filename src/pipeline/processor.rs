//! Pipeline orchestrator — validate → classify → respond → dispatch.
//!
//! Linear per-email state machine, no retry. Lower components signal
//! expected failures by returning `None`-like values; unexpected failures
//! (collaborator errors) propagate up and are converted into the uniform
//! failure result only at this boundary. One email's failure never aborts
//! the batch.

use std::sync::Arc;

use tracing::{error, info};

use crate::llm::LlmProvider;
use crate::pipeline::classifier::{Classification, Classifier};
use crate::pipeline::dispatch::Dispatcher;
use crate::pipeline::responder::Responder;
use crate::pipeline::types::{EmailRecord, ProcessingResult};
use crate::services::{FeedbackLog, Notifier, Ticketing};

/// Sequences the triage pipeline for each email.
///
/// Holds no mutable state across invocations; the only shared handle is
/// the LLM client inside the classifier and responder.
pub struct EmailPipeline {
    classifier: Classifier,
    responder: Responder,
    dispatcher: Dispatcher,
}

impl EmailPipeline {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        ticketing: Arc<dyn Ticketing>,
        notifier: Arc<dyn Notifier>,
        feedback: Arc<dyn FeedbackLog>,
    ) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&llm)),
            responder: Responder::new(llm),
            dispatcher: Dispatcher::new(ticketing, notifier, feedback),
        }
    }

    /// Process one email to completion, producing the uniform result
    /// record. Never returns an error — every failure mode ends in a
    /// `success = false` result.
    pub async fn process(&self, email: &EmailRecord) -> ProcessingResult {
        let email_id = email.id_or_empty().to_string();
        info!(id = %email_id, "Processing email");

        // Step 1: validate — no further steps run on an incomplete record.
        if !email.is_complete() {
            error!(id = %email_id, stage = "validate", "Email is missing required fields");
            return ProcessingResult::failed(email_id, None);
        }

        // Step 2: classify. Out-of-vocabulary tokens are carried on the
        // failure result for diagnostics; transport failures carry nothing.
        let category = match self.classifier.classify(email).await {
            Classification::Category(category) => category,
            Classification::Unrecognized(raw) => {
                error!(id = %email_id, stage = "classify", raw = %raw, "Invalid classification");
                return ProcessingResult::failed(email_id, Some(raw));
            }
            Classification::Failed => {
                return ProcessingResult::failed(email_id, None);
            }
        };

        // Step 3: generate the response.
        let Some(response) = self.responder.generate(email, category).await else {
            error!(id = %email_id, stage = "respond", "Response generation failed");
            return ProcessingResult::failed(email_id, None);
        };

        // Step 4: dispatch. A handler failure discards the partial
        // classification/response pair in favor of the uniform failure
        // contract.
        if let Err(e) = self.dispatcher.dispatch(email, category, &response).await {
            error!(id = %email_id, stage = "dispatch", error = %e, "Dispatch failed");
            return ProcessingResult::failed(email_id, None);
        }

        info!(id = %email_id, category = %category, "Email processed");
        ProcessingResult::ok(email_id, category, response)
    }

    /// Process a batch sequentially, preserving input order.
    ///
    /// Each email runs to completion (both LLM round trips included)
    /// before the next begins. Always yields one result per input.
    pub async fn process_batch(&self, emails: &[EmailRecord]) -> Vec<ProcessingResult> {
        info!(count = emails.len(), "Processing email batch");

        let mut results = Vec::with_capacity(emails.len());
        for email in emails {
            results.push(self.process(email).await);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(succeeded, total = results.len(), "Batch processing complete");
        results
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionRequest, CompletionResponse};
    use crate::pipeline::dispatch::recording::{Call, Recorder};
    use crate::pipeline::types::Category;

    /// Deterministic provider that replays a script of completions, one
    /// per call: first the classification answer, then the refinement.
    /// Once the script is exhausted it replays the last entry, so
    /// reprocessing the same email yields identical output.
    struct ScriptedLlm {
        script: Mutex<VecDeque<Result<String, ()>>>,
        last: Result<String, ()>,
    }

    impl ScriptedLlm {
        fn new(script: Vec<Result<&str, ()>>) -> Arc<Self> {
            let script: VecDeque<_> = script
                .into_iter()
                .map(|r| r.map(String::from))
                .collect();
            let last = script.back().cloned().unwrap_or(Err(()));
            Arc::new(Self {
                script: Mutex::new(script),
                last,
            })
        }
    }

    #[async_trait::async_trait]
    impl LlmProvider for ScriptedLlm {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.last.clone());
            match next {
                Ok(content) => Ok(CompletionResponse {
                    content,
                    input_tokens: 100,
                    output_tokens: 40,
                }),
                Err(()) => Err(LlmError::RequestFailed {
                    provider: "scripted".into(),
                    reason: "unreachable host".into(),
                }),
            }
        }
    }

    fn pipeline(llm: Arc<ScriptedLlm>, recorder: &Arc<Recorder>) -> EmailPipeline {
        EmailPipeline::new(
            llm,
            Arc::clone(recorder) as Arc<dyn Ticketing>,
            Arc::clone(recorder) as Arc<dyn Notifier>,
            Arc::clone(recorder) as Arc<dyn FeedbackLog>,
        )
    }

    fn email(id: &str, body: &str) -> EmailRecord {
        EmailRecord {
            id: Some(id.into()),
            from_addr: Some("customer@example.com".into()),
            subject: Some("Subject".into()),
            body: Some(body.into()),
            timestamp: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn invalid_email_fails_without_any_calls() {
        let recorder = Recorder::shared();
        let pipeline = pipeline(ScriptedLlm::new(vec![Ok("complaint")]), &recorder);

        let mut incomplete = email("010", "body");
        incomplete.from_addr = None;

        let result = pipeline.process(&incomplete).await;
        assert_eq!(result, ProcessingResult::failed("010", None));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_run_yields_ok_result_and_dispatch() {
        let recorder = Recorder::shared();
        let llm = ScriptedLlm::new(vec![Ok("complaint"), Ok("We sincerely apologize.")]);
        let pipeline = pipeline(llm, &recorder);

        let result = pipeline.process(&email("001", "Damaged, want a refund.")).await;
        assert_eq!(
            result,
            ProcessingResult::ok("001", Category::Complaint, "We sincerely apologize.")
        );

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::UrgentTicket { email_id, .. } if email_id == "001"));
        assert!(matches!(&calls[1], Call::ComplaintResponse { email_id, .. } if email_id == "001"));
    }

    #[tokio::test]
    async fn unrecognized_classification_passes_raw_token_through() {
        let recorder = Recorder::shared();
        let pipeline = pipeline(ScriptedLlm::new(vec![Ok("spam")]), &recorder);

        let result = pipeline.process(&email("011", "Buy now!")).await;
        assert_eq!(result, ProcessingResult::failed("011", Some("spam".into())));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn classification_transport_failure_yields_bare_failure() {
        let recorder = Recorder::shared();
        let pipeline = pipeline(ScriptedLlm::new(vec![Err(())]), &recorder);

        let result = pipeline.process(&email("012", "Hello")).await;
        assert_eq!(result, ProcessingResult::failed("012", None));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn responder_failure_takes_uniform_failure_path() {
        let recorder = Recorder::shared();
        let pipeline = pipeline(ScriptedLlm::new(vec![Ok("inquiry"), Err(())]), &recorder);

        let result = pipeline.process(&email("013", "Mac compatible?")).await;
        assert_eq!(result, ProcessingResult::failed("013", None));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn dispatch_failure_discards_partial_success() {
        let recorder = Recorder::failing();
        let llm = ScriptedLlm::new(vec![Ok("inquiry"), Ok("We will follow up soon.")]);
        let pipeline = pipeline(llm, &recorder);

        let result = pipeline.process(&email("014", "Question.")).await;
        // Classification and response were computed, but the failure
        // result carries neither.
        assert_eq!(result, ProcessingResult::failed("014", None));
    }

    #[tokio::test]
    async fn reprocessing_with_deterministic_stub_is_idempotent() {
        let recorder = Recorder::shared();
        let llm = ScriptedLlm::new(vec![
            Ok("feedback"),
            Ok("Thank you for the kind words."),
            Ok("feedback"),
            Ok("Thank you for the kind words."),
        ]);
        let pipeline = pipeline(llm, &recorder);
        let record = email("003", "Sarah was great.");

        let first = pipeline.process(&record).await;
        let second = pipeline.process(&record).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn batch_preserves_order_and_survives_failures() {
        let recorder = Recorder::shared();
        // First email classifies fine; second returns an unknown token.
        let llm = ScriptedLlm::new(vec![
            Ok("other"),
            Ok("Thanks, we are on it."),
            Ok("spam"),
        ]);
        let pipeline = pipeline(llm, &recorder);

        let emails = vec![email("020", "Partnership?"), email("021", "Buy now!")];
        let results = pipeline.process_batch(&emails).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].email_id, "020");
        assert!(results[0].success);
        assert_eq!(results[1].email_id, "021");
        assert!(!results[1].success);
        assert_eq!(results[1].classification.as_deref(), Some("spam"));
    }
}

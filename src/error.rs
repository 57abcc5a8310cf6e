//! Error types for Support Triage.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Errors from the side-effecting collaborators behind dispatch.
///
/// Not caught at the handler level — these propagate to the pipeline's
/// outer boundary, which converts them into a failure result.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Ticketing call {operation} failed for email {email_id}: {reason}")]
    Ticketing {
        operation: String,
        email_id: String,
        reason: String,
    },

    #[error("Notification send failed for email {email_id}: {reason}")]
    Notification { email_id: String, reason: String },

    #[error("Feedback log write failed for email {email_id}: {reason}")]
    FeedbackLog { email_id: String, reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

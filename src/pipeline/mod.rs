//! Email triage pipeline: validate → classify → respond → dispatch.

pub mod classifier;
pub mod dispatch;
pub mod processor;
pub mod responder;
pub mod types;

pub use classifier::{Classification, Classifier};
pub use dispatch::Dispatcher;
pub use processor::EmailPipeline;
pub use responder::Responder;
pub use types::{Category, EmailRecord, ProcessingResult};

//! Support Triage — LLM-backed support email classification and reply.

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod samples;
pub mod services;

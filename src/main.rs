use std::sync::Arc;

use support_triage::config::LlmConfig;
use support_triage::llm::create_provider;
use support_triage::pipeline::EmailPipeline;
use support_triage::report::summary_table;
use support_triage::samples::sample_emails;
use support_triage::services::{LoggingFeedbackLog, LoggingNotifier, LoggingTicketing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = LlmConfig::from_env().map_err(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export OPENAI_API_KEY=sk-...");
        e
    })?;

    eprintln!("📧 Support Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Endpoint: {}\n", config.base_url);

    let llm = create_provider(&config)?;

    let pipeline = EmailPipeline::new(
        llm,
        Arc::new(LoggingTicketing),
        Arc::new(LoggingNotifier),
        Arc::new(LoggingFeedbackLog),
    );

    let emails = sample_emails();
    let results = pipeline.process_batch(&emails).await;

    println!("\nProcessing Summary:");
    println!("{}", summary_table(&results));

    Ok(())
}

//! Tabular summary of processing results.

use crate::pipeline::types::ProcessingResult;

/// Response text is cut to this many characters in the table.
const RESPONSE_PREVIEW_CHARS: usize = 48;

/// Render the batch summary as a fixed-width table with columns
/// email_id, success, classification, response_sent.
pub fn summary_table(results: &[ProcessingResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<8} {:<16} {}\n",
        "email_id", "success", "classification", "response_sent"
    ));
    out.push_str(&format!("{:-<10} {:-<8} {:-<16} {:-<48}\n", "", "", "", ""));

    for result in results {
        let classification = result.classification.as_deref().unwrap_or("-");
        let response = result
            .response_sent
            .as_deref()
            .map(preview)
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<10} {:<8} {:<16} {}\n",
            result.email_id, result.success, classification, response
        ));
    }

    out
}

/// Single-line preview of a response, truncated with an ellipsis.
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= RESPONSE_PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(RESPONSE_PREVIEW_CHARS).collect();
        format!("{cut}…")
    }
}

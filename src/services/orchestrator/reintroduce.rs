//! Result Reintroduction
//!
//! Transforms a raw operation result into exactly one synthetic user turn:
//! a short display sentence for the end user, followed by the full JSON
//! payload between hidden-data sentinels so the model receives complete data
//! while the UI layer may render only the sentence.

use serde_json::Value;

use turboforge_core::OperationKind;

use crate::models::chat::ChatMessage;
use crate::services::chat::Conversation;
use crate::utils::error::AppResult;

/// Opening sentinel of the hidden research payload.
pub const HIDDEN_RESEARCH_OPEN: &str = "[HIDDEN_RESEARCH_DATA]";
/// Closing sentinel of the hidden research payload.
pub const HIDDEN_RESEARCH_CLOSE: &str = "[/HIDDEN_RESEARCH_DATA]";
/// Opening sentinel of the hidden implementation payload.
pub const HIDDEN_IMPLEMENTATION_OPEN: &str = "[HIDDEN_IMPLEMENTATION_DATA]";
/// Closing sentinel of the hidden implementation payload.
pub const HIDDEN_IMPLEMENTATION_CLOSE: &str = "[/HIDDEN_IMPLEMENTATION_DATA]";

/// Build the full research reintroduction message.
pub fn research_message(result: &Value) -> String {
    let process_type = field_str(result, "/researchData/processType").unwrap_or("unknown");
    let industry = field_str(result, "/researchData/industry").unwrap_or("unknown");
    let count = result
        .pointer("/researchData/searchResults")
        .and_then(Value::as_array)
        .map(|results| results.len())
        .unwrap_or(0);

    let display = format!(
        "Research completed successfully. Found {} relevant sources for {} in {}. Please design a complete TurboForge process based on the research findings.",
        count, process_type, industry
    );
    wrap_hidden(&display, HIDDEN_RESEARCH_OPEN, HIDDEN_RESEARCH_CLOSE, result)
}

/// Build the full implementation reintroduction message.
pub fn implementation_message(result: &Value) -> String {
    let process_name = field_str(result, "/processName").unwrap_or("unknown");
    let process_id = field_display(result, "/processId");
    let admin_url = field_str(result, "/links/admin").unwrap_or("Not available");
    let user_url = field_str(result, "/links/user").unwrap_or("Not available");

    let display = format!(
        "Implementation completed successfully! Created \"{}\" with ID: {}.\n\nAdmin URL: {}\nUser URL: {}\n\nPlease provide a summary of what was created and any next steps.",
        process_name, process_id, admin_url, user_url
    );
    wrap_hidden(
        &display,
        HIDDEN_IMPLEMENTATION_OPEN,
        HIDDEN_IMPLEMENTATION_CLOSE,
        result,
    )
}

/// Format and append the synthetic user turn carrying the result.
pub(super) async fn submit_result(
    conversation: &dyn Conversation,
    kind: OperationKind,
    result: &Value,
) -> AppResult<()> {
    let full_message = match kind {
        OperationKind::Research => research_message(result),
        OperationKind::Implement => implementation_message(result),
    };
    conversation.append(ChatMessage::user(full_message)).await
}

fn wrap_hidden(display: &str, open: &str, close: &str, result: &Value) -> String {
    let json = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    format!("{}\n\n{}\n{}\n{}", display, open, json, close)
}

fn field_str<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// String form of a field that may be a string or a bare JSON scalar.
fn field_display(value: &Value, pointer: &str) -> String {
    match value.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

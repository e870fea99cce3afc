//! Embedded Command Scanner
//!
//! Assistant output may carry bracketed command tags that trigger a backend
//! operation. Two grammars exist, checked in fixed priority order:
//!
//! - Research: `[RESEARCH_REQUEST:<processType>:<industry>]`. The payload is
//!   split at the first colon and both fields are trimmed. No escaping of `:`
//!   is supported; the industry field may itself contain further colons.
//! - Implement: `[IMPLEMENT_PROCESS:<json>]`. The payload is a JSON document
//!   that may span multiple lines. The scanner tracks JSON string and bracket
//!   state, so a payload containing `]` inside arrays or string literals
//!   terminates at the correct closing bracket.
//!
//! Scanning is deliberately tag-token based rather than regex based: parse
//! failure of the implement payload is a first-class `Detection::Malformed`
//! outcome, and an unterminated tag is treated as no match at all (the
//! message may still be streaming).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::operation::OperationKind;

/// Opening token of the research command grammar.
pub const RESEARCH_TAG: &str = "[RESEARCH_REQUEST:";

/// Opening token of the implement command grammar.
pub const IMPLEMENT_TAG: &str = "[IMPLEMENT_PROCESS:";

/// A structurally valid embedded command extracted from assistant text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Research request with both fields trimmed of surrounding whitespace.
    Research {
        process_type: String,
        industry: String,
    },
    /// Implementation request carrying the parsed process definition.
    Implement { process_definition: Value },
}

impl Command {
    /// The operation kind this command launches.
    pub fn kind(&self) -> OperationKind {
        match self {
            Command::Research { .. } => OperationKind::Research,
            Command::Implement { .. } => OperationKind::Implement,
        }
    }
}

/// Outcome of scanning a text for embedded commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// No complete command tag present.
    None,
    /// A command was recognized and its parameters extracted.
    Command(Command),
    /// A complete implement tag was present but its payload is not valid
    /// JSON. The caller is expected to log and drop this without marking the
    /// message as processed, so a later revision of the message can match.
    Malformed { reason: String },
}

impl Detection {
    /// Whether this outcome carries a launchable command.
    pub fn is_command(&self) -> bool {
        matches!(self, Detection::Command(_))
    }
}

/// Scan `text` for an embedded command.
///
/// Grammars are tested in fixed order (research first). The two tags are
/// structurally disjoint, so the order only matters for determinism when a
/// single message carries both.
pub fn detect(text: &str) -> Detection {
    if let Some(command) = detect_research(text) {
        return Detection::Command(command);
    }
    detect_implement(text)
}

/// Match the research grammar: payload runs to the first `]`, fields split at
/// the first `:`. Both fields must be non-empty before trimming, mirroring
/// the wire format.
fn detect_research(text: &str) -> Option<Command> {
    let start = text.find(RESEARCH_TAG)? + RESEARCH_TAG.len();
    let rest = &text[start..];
    let end = rest.find(']')?;
    let payload = &rest[..end];

    let colon = payload.find(':')?;
    let (process_type, industry) = (&payload[..colon], &payload[colon + 1..]);
    if process_type.is_empty() || industry.is_empty() {
        return None;
    }

    Some(Command::Research {
        process_type: process_type.trim().to_string(),
        industry: industry.trim().to_string(),
    })
}

/// Match the implement grammar. The payload is delimited by a JSON-aware
/// bracket scan; once delimited it must parse as JSON or the match degrades
/// to `Malformed`.
fn detect_implement(text: &str) -> Detection {
    let start = match text.find(IMPLEMENT_TAG) {
        Some(pos) => pos + IMPLEMENT_TAG.len(),
        None => return Detection::None,
    };
    let payload = match delimit_json_payload(&text[start..]) {
        Some(payload) => payload,
        // Unterminated tag: the message may still be streaming in.
        None => return Detection::None,
    };

    match serde_json::from_str::<Value>(payload.trim()) {
        Ok(process_definition) => Detection::Command(Command::Implement { process_definition }),
        Err(err) => Detection::Malformed {
            reason: err.to_string(),
        },
    }
}

/// Find the span of a JSON payload terminated by the tag's closing `]`.
///
/// Tracks string/escape state and `[`/`{` nesting depth so that brackets
/// inside the document do not end the tag early. Returns `None` when the
/// closing bracket never appears.
fn delimit_json_payload(rest: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in rest.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' if depth == 0 => return Some(&rest[..idx]),
            ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

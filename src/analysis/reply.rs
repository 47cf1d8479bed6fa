//! Model reply reshaping
//!
//! Models tend to wrap JSON in Markdown code fences even when told not to.

use regex::Regex;
use serde_json::Value;

use super::description::ProblemDescription;
use crate::error::{AnalysisError, HintError};

lazy_static::lazy_static! {
    static ref FENCED_JSON: Regex =
        Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced JSON pattern is valid");
}

/// Strip Markdown fences around the JSON payload, if any.
pub fn unwrap_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    if let Some(body) = FENCED_JSON.captures(trimmed).and_then(|c| c.get(1)) {
        return body.as_str().trim();
    }
    if trimmed.len() >= 6 && trimmed.starts_with("```") && trimmed.ends_with("```") {
        return trimmed[3..trimmed.len() - 3].trim();
    }
    trimmed
}

/// Parse a model reply into problem descriptions, in reply order.
///
/// A bare object is treated as a one-problem worksheet. Each element is read
/// on its own so a bad entry is reported by position.
pub fn parse_reply(reply: &str) -> Result<Vec<ProblemDescription>, AnalysisError> {
    let payload: Value =
        serde_json::from_str(unwrap_fences(reply)).map_err(AnalysisError::MalformedReply)?;

    let entries = match payload {
        Value::Array(entries) => entries,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(AnalysisError::InvalidProblem {
                index: 1,
                source: HintError::invalid(format!("expected a problem object, got {other}")),
            })
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry).map_err(|e| AnalysisError::InvalidProblem {
                index: i + 1,
                source: HintError::invalid(e.to_string()),
            })
        })
        .collect()
}

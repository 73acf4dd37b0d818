//! Parse model output into resume records

use crate::LlmError;
use duonova_domain::ResumeRecord;
use serde_json::Value;
use tracing::debug;

/// Parse a model's text answer into a resume record
///
/// Markdown code fences are stripped and everything outside the outermost
/// braces is dropped. The answer must be a JSON object without an `error` key
/// and with at least one recognized section.
pub fn parse_resume_response(response: &str) -> Result<ResumeRecord, LlmError> {
    let malformed = |reason: String| LlmError::MalformedResponse {
        reason,
        raw: response.to_string(),
    };

    let unfenced = strip_code_fences(response);
    let json_str = outermost_object(&unfenced)
        .ok_or_else(|| malformed("No JSON object in response".to_string()))?;

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| malformed(format!("JSON parse error: {}", e)))?;

    let object = json
        .as_object()
        .ok_or_else(|| malformed("Expected JSON object".to_string()))?;

    if let Some(error) = object.get("error") {
        return Err(malformed(format!("Provider reported an error: {}", error)));
    }

    if !ResumeRecord::SECTIONS.iter().any(|section| object.contains_key(*section)) {
        return Err(malformed("No recognized resume section".to_string()));
    }

    let record: ResumeRecord = serde_json::from_value(json)
        .map_err(|e| malformed(format!("Unexpected section shape: {}", e)))?;

    debug!("Parsed resume record from {} byte response", response.len());
    Ok(record)
}

/// Remove a surrounding markdown code block, if present
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        // Skip the opening fence and a closing fence if there is one
        let end = if lines.len() > 1 && lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        lines[1.min(end)..end].join("\n")
    } else {
        trimmed.to_string()
    }
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

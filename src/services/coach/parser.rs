//! Coach Reply Parsing
//!
//! Extracts and repairs the `{analysis, plan, mantra}` object a generation
//! service returns. Anything that cannot be repaired is a schema violation.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use daily_up_core::{CoachResponse, CoreError, CoreResult, ResponseSource, TimeSlot};

/// Keys accepted for the plan array, in lookup order
const PLAN_KEYS: [&str; 3] = ["plan", "plan_steps", "steps"];

/// Leading bullets, numbering and "Step N:" labels (compiled once).
fn bullet_prefix() -> Option<&'static Regex> {
    static BULLET: OnceLock<Option<Regex>> = OnceLock::new();
    BULLET
        .get_or_init(|| {
            Regex::new(r"(?i)^\s*(?:[-*•·]+\s*|\(?\d+[.):]\s*|step\s*\d+\s*[:.)-]?\s*)+").ok()
        })
        .as_ref()
}

/// Extract a JSON object from response text, handling markdown fences and surrounding text.
pub fn extract_json_from_response(response_text: &str) -> String {
    let trimmed = response_text.trim();

    // Try markdown code fences
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return outermost_object(content[..end].trim()).to_string();
        }
    }

    outermost_object(trimmed).to_string()
}

/// Slice from the first `{` to the last `}`, or the input when there is none.
fn outermost_object(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start <= end {
            return &text[start..=end];
        }
    }
    text
}

/// Drop bullets and numbering from a plan line.
pub fn clean_step(step: &str) -> String {
    let step = step.trim();
    match bullet_prefix() {
        Some(re) => re.replace(step, "").trim().to_string(),
        None => step.to_string(),
    }
}

/// Render a scalar or object plan item as text.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => ["step", "text", "action", "title"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

fn text_field(object: &serde_json::Map<String, Value>, key: &str) -> String {
    object.get(key).map(value_to_text).unwrap_or_default()
}

/// Parse a generation reply into a normalized coach response.
pub fn parse_coach_reply(response_text: &str, slot: TimeSlot) -> CoreResult<CoachResponse> {
    if response_text.trim().is_empty() {
        return Err(CoreError::schema_violation("empty reply"));
    }

    let json_str = extract_json_from_response(response_text);
    if !json_str.starts_with('{') {
        return Err(CoreError::schema_violation(format!(
            "no JSON object in reply (starts with: {:?})",
            response_text.chars().take(80).collect::<String>()
        )));
    }

    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| CoreError::schema_violation(format!("invalid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| CoreError::schema_violation("reply is not a JSON object"))?;

    let plan = PLAN_KEYS
        .iter()
        .find_map(|k| object.get(*k))
        .ok_or_else(|| CoreError::schema_violation("plan is missing"))?;

    let items = plan
        .as_array()
        .ok_or_else(|| CoreError::schema_violation("plan is not an array"))?;

    let steps: Vec<String> = items
        .iter()
        .map(|item| clean_step(&value_to_text(item)))
        .filter(|s| !s.is_empty())
        .collect();

    if steps.is_empty() {
        return Err(CoreError::schema_violation("plan has no usable steps"));
    }

    let analysis = text_field(object, "analysis");
    let analysis = analysis.trim();
    if analysis.is_empty() {
        return Err(CoreError::schema_violation("analysis is missing or empty"));
    }

    let mantra = text_field(object, "mantra");
    let mantra = mantra
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '“' || c == '”')
        .trim();
    if mantra.is_empty() {
        return Err(CoreError::schema_violation("mantra is missing or empty"));
    }

    Ok(CoachResponse::new(
        slot,
        analysis,
        steps,
        mantra,
        ResponseSource::Ai,
    ))
}

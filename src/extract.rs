//! Reply extraction from upstream responses
//!
//! The upstream body is treated as opaque JSON; only a small set of known
//! paths is probed. Extraction is an ordered list of candidate probes that
//! stops at the first non-blank result, so new upstream response shapes can
//! be supported by appending a probe.

use serde_json::Value;

/// A single candidate path into the upstream response
type Probe = fn(&Value) -> Option<&str>;

/// Probes in preference order. `choices[0].message.content` is the
/// chat-completions shape; `choices[0].text` is the legacy completions shape
/// some models still emit.
const PROBES: [Probe; 2] = [first_choice_message_content, first_choice_text];

fn first_choice_message_content(response: &Value) -> Option<&str> {
    response
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

fn first_choice_text(response: &Value) -> Option<&str> {
    response.get("choices")?.get(0)?.get("text")?.as_str()
}

/// Extract the generated reply text from an upstream response body
///
/// Returns the first non-blank candidate, trimmed. `None` means the upstream
/// succeeded but produced nothing usable.
pub fn extract_reply(response: &Value) -> Option<String> {
    PROBES.iter().find_map(|probe| {
        probe(response)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    })
}

/// Pull `choices[0].finish_reason` through if the upstream provided it
pub fn finish_reason(response: &Value) -> Option<String> {
    response
        .get("choices")?
        .get(0)?
        .get("finish_reason")?
        .as_str()
        .map(str::to_owned)
}

/// Total tokens consumed per the upstream usage block, defaulting to 0
pub fn tokens_used(response: &Value) -> u64 {
    response
        .get("usage")
        .and_then(|usage| usage.get("total_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

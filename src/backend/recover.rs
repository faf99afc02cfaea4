use serde_json::Value;
use tracing::trace;

/// Recover a JSON value from raw model output.
///
/// Tries a direct parse first. If that fails and the text is fenced as a
/// markdown JSON code block (an opening three-backtick-plus-"json" marker
/// with a matching closing marker), strips the fence markers, trims, and
/// parses once more. Anything else yields `None`: an unparseable response is
/// an expected LLM-fidelity failure handled by the retry loop, not an error.
///
/// Known limitation: the fence heuristic is anchored. The opening marker must
/// begin the (trimmed) text and the closing marker must end it; a fence
/// preceded or followed by prose is not recognized.
pub fn recover_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        trace!("content parsed as JSON directly");
        return Some(value);
    }

    let fenced = trimmed.strip_prefix("```json")?.strip_suffix("```")?;
    trace!("content was fence-wrapped, reparsing stripped body");
    serde_json::from_str(fenced.trim()).ok()
}

//! Directive extraction from collaborator responses
//!
//! A response may carry a THOUGHT, an ACTION, and an ANSWER segment, each
//! introduced by its literal marker and running to the next marker or end of
//! text. The parser is total: malformed input yields an empty directive,
//! never an error.

use crate::core::ToolCall;

/// Marker opening the reasoning segment
pub const THOUGHT_MARKER: &str = "THOUGHT:";
/// Marker opening the action segment
pub const ACTION_MARKER: &str = "ACTION:";
/// Marker opening the terminal answer segment
pub const ANSWER_MARKER: &str = "ANSWER:";

const MARKERS: [&str; 3] = [THOUGHT_MARKER, ACTION_MARKER, ANSWER_MARKER];

/// Intent extracted from a single collaborator response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directive {
    /// Free-text reasoning, if the response carried a THOUGHT segment
    pub reasoning: Option<String>,
    /// Requested tool invocation, if the ACTION segment held a valid object
    pub action: Option<ToolCall>,
    /// Terminal answer, if the response carried an ANSWER segment
    pub answer: Option<String>,
}

impl Directive {
    /// True when the response carried neither an action nor an answer
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.answer.is_none()
    }
}

/// Parse a collaborator response into a directive
///
/// Pure function: the same input always yields the same directive, and no
/// input causes a failure. When a marker repeats, only its first occurrence
/// is considered.
pub fn parse_directive(text: &str) -> Directive {
    Directive {
        reasoning: segment(text, THOUGHT_MARKER),
        action: segment(text, ACTION_MARKER).and_then(|s| extract_action(&s)),
        answer: segment(text, ANSWER_MARKER),
    }
}

/// Extract the text between a marker and the next marker (or end of text)
fn segment(text: &str, marker: &str) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];

    let end = MARKERS
        .iter()
        .filter_map(|m| rest.find(m))
        .min()
        .unwrap_or(rest.len());

    let content = rest[..end].trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Find a tool call object inside an action segment
///
/// Scans for balanced-brace JSON candidates so surrounding prose does not
/// break extraction; the first candidate with a string "tool" field wins.
fn extract_action(segment: &str) -> Option<ToolCall> {
    let bytes = segment.as_bytes();
    let mut start = 0;

    while let Some(open) = segment[start..].find('{').map(|i| i + start) {
        if let Some(close) = matching_brace(bytes, open) {
            let candidate = &segment[open..=close];
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(candidate) {
                if let Some(tool) = value.get("tool").and_then(|v| v.as_str()) {
                    let arguments = value
                        .get("args")
                        .cloned()
                        .unwrap_or_else(|| serde_json::json!({}));
                    return Some(ToolCall::new(tool, arguments));
                }
            }
        }
        start = open + 1;
    }

    None
}

/// Index of the brace closing the one at `open`, by depth counting
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_directive() {
        let text = "THOUGHT: I should look at the directory first.\n\
                    ACTION: {\"tool\": \"list_directory\", \"args\": {\"path\": \"docs\"}}";
        let directive = parse_directive(text);

        assert_eq!(
            directive.reasoning.as_deref(),
            Some("I should look at the directory first.")
        );
        let action = directive.action.unwrap();
        assert_eq!(action.name, "list_directory");
        assert_eq!(action.get_string("path").as_deref(), Some("docs"));
        assert!(directive.answer.is_none());
    }

    #[test]
    fn test_answer_only() {
        let directive = parse_directive("ANSWER: The file contains 42 lines.");
        assert!(directive.action.is_none());
        assert_eq!(
            directive.answer.as_deref(),
            Some("The file contains 42 lines.")
        );
    }

    #[test]
    fn test_both_action_and_answer_extracted() {
        let text = "ACTION: {\"tool\": \"read_file\", \"args\": {\"path\": \"a.txt\"}}\n\
                    ANSWER: done";
        let directive = parse_directive(text);
        assert!(directive.action.is_some());
        assert_eq!(directive.answer.as_deref(), Some("done"));
    }

    #[test]
    fn test_no_markers() {
        let directive = parse_directive("I'm not sure how to proceed with this.");
        assert!(directive.is_empty());
        assert!(directive.reasoning.is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_directive("").is_empty());
    }

    #[test]
    fn test_truncated_json_is_no_action() {
        let directive = parse_directive("ACTION: {\"tool\": \"read_file\", \"args\": {\"pa");
        assert!(directive.action.is_none());
        assert!(directive.is_empty());
    }

    #[test]
    fn test_action_without_tool_field_ignored() {
        let directive = parse_directive("ACTION: {\"name\": \"read_file\"}");
        assert!(directive.action.is_none());
    }

    #[test]
    fn test_missing_args_defaults_to_empty_object() {
        let directive = parse_directive("ACTION: {\"tool\": \"delete_everything\"}");
        let action = directive.action.unwrap();
        assert_eq!(action.name, "delete_everything");
        assert_eq!(action.arguments, serde_json::json!({}));
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let text = "ACTION: sure, calling {\"tool\": \"get_info\", \"args\": {}} right away";
        let directive = parse_directive(text);
        assert_eq!(directive.action.unwrap().name, "get_info");
    }

    #[test]
    fn test_first_valid_object_wins() {
        let text = "ACTION: {\"broken\": } then {\"tool\": \"first\"} and {\"tool\": \"second\"}";
        let directive = parse_directive(text);
        assert_eq!(directive.action.unwrap().name, "first");
    }

    #[test]
    fn test_nested_braces_in_args() {
        let text = "ACTION: {\"tool\": \"run_python\", \"args\": {\"code\": \"d = {'a': {'b': 1}}\"}}";
        let directive = parse_directive(text);
        let action = directive.action.unwrap();
        assert_eq!(action.name, "run_python");
        assert!(action.get_string("code").unwrap().contains("{'a': {'b': 1}}"));
    }

    #[test]
    fn test_braces_inside_json_strings() {
        let text = "ACTION: {\"tool\": \"write_file\", \"args\": {\"content\": \"fn main() {}\"}}";
        let directive = parse_directive(text);
        assert_eq!(directive.action.unwrap().name, "write_file");
    }

    #[test]
    fn test_repeated_marker_uses_first() {
        let text = "ANSWER: first answer\nANSWER: second answer";
        let directive = parse_directive(text);
        assert_eq!(directive.answer.as_deref(), Some("first answer"));
    }

    #[test]
    fn test_markers_out_of_order() {
        let text = "ANSWER: done\nTHOUGHT: in hindsight";
        let directive = parse_directive(text);
        assert_eq!(directive.answer.as_deref(), Some("done"));
        assert_eq!(directive.reasoning.as_deref(), Some("in hindsight"));
    }

    #[test]
    fn test_marker_with_empty_segment() {
        let directive = parse_directive("THOUGHT:\nACTION:");
        assert!(directive.reasoning.is_none());
        assert!(directive.action.is_none());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let text = "THOUGHT: hmm\nACTION: {\"tool\": \"read_file\", \"args\": {\"path\": \"x\"}}";
        assert_eq!(parse_directive(text), parse_directive(text));
    }
}

//! JSON payload recovery from free-form backend replies.
//!
//! Backends regularly wrap the requested JSON object in prose or code
//! fences. The extractor slices from the first `{` to the last `}` and
//! leaves everything else to the JSON parser; it does not attempt
//! bracket-balance repair.

/// Extract the candidate JSON object from a raw reply.
///
/// Returns the substring from the first `{` through the last `}`
/// inclusive, or `None` when either brace is absent or the last `}`
/// precedes the first `{`. The result may still be malformed JSON; the
/// parser decides that.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_surrounding_chatter() {
        assert_eq!(
            extract_json_object("chatter {\"a\":1} trailing"),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_extracts_from_code_fence() {
        let raw = "Here you go:\n```json\n{\"name\": \"Bob\"}\n```\n";
        assert_eq!(extract_json_object(raw), Some("{\"name\": \"Bob\"}"));
    }

    #[test]
    fn test_no_braces_yields_none() {
        assert_eq!(extract_json_object("no braces here"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn test_reversed_braces_yield_none() {
        assert_eq!(extract_json_object("} nope {"), None);
    }

    #[test]
    fn test_spans_first_to_last_brace() {
        // Two objects in one reply: the slice covers both; the parser
        // rejects it downstream.
        assert_eq!(extract_json_object("{\"a\":1} and {\"b\":2}"), Some("{\"a\":1} and {\"b\":2}"));
    }

    #[test]
    fn test_bare_object_passes_through() {
        assert_eq!(extract_json_object("{\"a\":1}"), Some("{\"a\":1}"));
    }
}

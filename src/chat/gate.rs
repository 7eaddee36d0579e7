//! Topic gating for outgoing chat messages
//!
//! Students may only ask syllabus-related questions. A message passes
//! classification when its lowercase form contains at least one keyword
//! from the fixed allow-list; everything else is rejected before the
//! chatbot backend is contacted.

/// Keywords a message must mention to reach the chatbot
pub const ALLOWED_TOPIC_KEYWORDS: [&str; 5] = ["course", "syllabus", "unit", "module", "subject"];

/// Local decision about one outgoing message
///
/// Lock-state rejections are decided by the session (they need fresh
/// server state); this module covers the purely local checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Message may be sent to the chatbot
    Allowed,
    /// Empty or whitespace-only; rejected with no network call
    RejectedEmpty,
    /// No allow-list keyword present; triggers a warning registration
    RejectedOffTopic,
}

/// Returns `true` when the message is about the syllabus
///
/// True iff the lowercase form of `text` contains at least one keyword
/// from [`ALLOWED_TOPIC_KEYWORDS`].
///
/// # Examples
///
/// ```
/// use syllachat::chat::gate::is_valid_syllabus_query;
///
/// assert!(is_valid_syllabus_query("What is the syllabus for unit 2?"));
/// assert!(!is_valid_syllabus_query("hello there"));
/// ```
pub fn is_valid_syllabus_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    ALLOWED_TOPIC_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classify one outgoing message
pub fn classify(text: &str) -> GateDecision {
    if text.trim().is_empty() {
        return GateDecision::RejectedEmpty;
    }
    if is_valid_syllabus_query(text) {
        GateDecision::Allowed
    } else {
        GateDecision::RejectedOffTopic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_passes() {
        for keyword in ALLOWED_TOPIC_KEYWORDS {
            assert!(
                is_valid_syllabus_query(&format!("tell me about the {}", keyword)),
                "keyword '{}' should pass",
                keyword
            );
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert!(is_valid_syllabus_query("SYLLABUS please"));
        assert!(is_valid_syllabus_query("Which Unit covers recursion?"));
        assert!(is_valid_syllabus_query("MoDuLe 3"));
    }

    #[test]
    fn test_keyword_inside_word_passes() {
        // Containment, not word-boundary matching: "subunit" contains "unit".
        assert!(is_valid_syllabus_query("what is a subunit"));
    }

    #[test]
    fn test_off_topic_fails() {
        assert!(!is_valid_syllabus_query("hello there"));
        assert!(!is_valid_syllabus_query("what's the weather like"));
        assert!(!is_valid_syllabus_query(""));
    }

    #[test]
    fn test_classify_empty_and_whitespace() {
        assert_eq!(classify(""), GateDecision::RejectedEmpty);
        assert_eq!(classify("   \t\n"), GateDecision::RejectedEmpty);
    }

    #[test]
    fn test_classify_allowed_and_off_topic() {
        assert_eq!(
            classify("What is the syllabus for unit 2?"),
            GateDecision::Allowed
        );
        assert_eq!(classify("hello there"), GateDecision::RejectedOffTopic);
    }
}

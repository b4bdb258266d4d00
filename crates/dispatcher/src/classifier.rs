//! Trading-signal detection.

/// Keywords that mark a message as an actionable trading signal.
const SIGNAL_KEYWORDS: [&str; 4] = ["BUY", "SELL", "TP", "SL"];

/// Check whether a message contains a trading signal.
///
/// Case-insensitive substring containment against the keyword set. Pure and
/// total: never fails, never has side effects.
pub fn is_signal(text: &str) -> bool {
    let normalized = text.to_uppercase();
    SIGNAL_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_keywords_case_insensitively() {
        assert!(is_signal("BUY EURUSD now"));
        assert!(is_signal("buy eurusd now"));
        assert!(is_signal("Sell gold at market"));
        assert!(is_signal("move tp to 1.0850"));
        assert!(is_signal("SL hit, close it"));
    }

    #[test]
    fn test_detects_keywords_as_substrings() {
        // Containment, not word matching: "sl" inside "slow" still counts.
        assert!(is_signal("slow day today"));
        assert!(is_signal("crypto buyers stepping in"));
    }

    #[test]
    fn test_ignores_messages_without_keywords() {
        assert!(!is_signal("good morning everyone"));
        assert!(!is_signal(""));
        assert!(!is_signal("EURUSD looking rangy"));
    }

    #[test]
    fn test_matches_uppercased_form() {
        for text in ["Buy now", "tp soon", "nothing here", "SeLl iT"] {
            assert_eq!(is_signal(text), is_signal(&text.to_uppercase()));
        }
    }
}

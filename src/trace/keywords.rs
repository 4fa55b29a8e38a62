//! Keyword extraction from free-text questions
//!
//! @module trace/keywords

/// Words that carry no signal about which code is relevant
const STOP_WORDS: &[&str] = &[
    // Articles, pronouns, prepositions
    "the", "and", "for", "with", "from", "into", "this", "that", "these", "those", "its",
    "our", "your", "their", "there", "then", "than", "about", "through", "between", "when",
    // WH-words
    "how", "what", "where", "which", "who", "whom", "whose", "why",
    // Common verbs in questions
    "does", "did", "done", "doing", "are", "was", "were", "been", "being", "has", "have",
    "had", "can", "could", "should", "would", "will", "shall", "may", "might", "must",
    "get", "gets", "got", "work", "works", "working", "implemented", "implement",
    "implements", "happen", "happens", "handled", "handle", "handles", "used", "use",
    "uses", "explain", "show", "tell", "find", "make", "makes", "made",
    // Filler
    "code", "file", "files", "function", "please", "some", "any", "all", "each", "every",
    "not", "out", "also", "just", "like",
];

/// Turn a question into a deduplicated, order-preserving list of search terms
///
/// Terms are lowercased with surrounding punctuation removed; tokens of two
/// characters or fewer and stop words are dropped.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in question.to_lowercase().split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '_');

        if token.chars().count() <= 2 || STOP_WORDS.contains(&token) {
            continue;
        }

        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

/// First keyword contained in an already-lowercased line
pub fn first_match<'k>(keywords: &'k [String], lowered: &str) -> Option<&'k str> {
    keywords
        .iter()
        .find(|k| lowered.contains(k.as_str()))
        .map(|k| k.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_keywords() {
        assert_eq!(extract_keywords("How does auth work?"), vec!["auth"]);
        assert_eq!(
            extract_keywords("Where is the Payment webhook implemented?"),
            vec!["payment", "webhook"]
        );
    }

    #[test]
    fn test_short_tokens_and_punctuation() {
        assert_eq!(
            extract_keywords("is it db or `user_service`, ok?!"),
            vec!["user_service"]
        );
        // Inner punctuation is kept
        assert_eq!(extract_keywords("what calls auth.verify()?"), vec!["calls", "auth.verify"]);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        assert_eq!(
            extract_keywords("router router Session ROUTER"),
            vec!["router", "session"]
        );
    }

    #[test]
    fn test_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("how does it work?").is_empty());
        assert!(extract_keywords("explain").is_empty());
    }

    #[test]
    fn test_first_match() {
        let keywords = vec!["token".to_string(), "auth".to_string()];
        assert_eq!(first_match(&keywords, "const auth = gettoken()"), Some("token"));
        assert_eq!(first_match(&keywords, "import { auth }"), Some("auth"));
        assert_eq!(first_match(&keywords, "nothing here"), None);
    }
}

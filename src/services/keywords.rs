//! Keyword Extraction
//!
//! Pulls a short, ordered list of topic words out of a free-text note for
//! prompt interpolation. Never fails.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Topic used when a note yields no keywords
pub const TOPIC_PLACEHOLDER: &str = "general productivity";

/// Stopword set (initialized once).
fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| {
        [
            "the", "and", "for", "are", "but", "not", "you", "your", "yours", "all", "any",
            "can", "had", "has", "have", "her", "hers", "him", "his", "how", "its", "our",
            "ours", "out", "she", "they", "them", "their", "theirs", "was", "were", "what",
            "when", "where", "which", "who", "whom", "why", "will", "with", "would", "could",
            "should", "shall", "may", "might", "must", "been", "being", "did", "does", "doing",
            "done", "this", "that", "these", "those", "there", "here", "then", "than", "too",
            "very", "just", "also", "into", "onto", "from", "about", "above", "below", "after",
            "before", "again", "once", "over", "under", "until", "while", "because", "some",
            "such", "only", "own", "same", "other", "more", "most", "much", "many", "each",
            "few", "nor", "off", "per", "via", "yet", "get", "got", "gets", "let", "lets",
            "make", "made", "want", "wanted", "need", "needs", "like", "really", "today",
            "tonight", "now", "still", "even", "ever", "every", "myself", "yourself", "itself",
            "ourselves", "themselves", "i'm", "im", "i've", "ive", "i'll", "ill", "i'd",
            "don't", "dont", "can't", "cant", "won't", "wont", "didn't", "didnt", "it's",
            "that's", "thats", "feel", "feeling", "bit", "lot", "thing", "things", "going",
        ]
        .into_iter()
        .collect()
    })
}

/// Split on anything that is not alphanumeric or an apostrophe, then trim
/// apostrophes from each token.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
}

/// Return up to `max_keywords` lowercase keywords in first-occurrence order.
///
/// Tokens of two characters or fewer and stopwords are skipped; duplicates are
/// kept only once.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let stopwords = stopwords();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in tokens(text) {
        if keywords.len() >= max_keywords {
            break;
        }
        if token.chars().count() <= 2 || stopwords.contains(token.as_str()) {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(token);
        }
    }

    keywords
}

/// Comma-joined keywords, or [`TOPIC_PLACEHOLDER`] when there are none.
pub fn topic_summary(text: &str, max_keywords: usize) -> String {
    let keywords = extract_keywords(text, max_keywords);
    if keywords.is_empty() {
        TOPIC_PLACEHOLDER.to_string()
    } else {
        keywords.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence_order() {
        let keywords = extract_keywords("Physics exam tomorrow, physics revision tonight!", 6);
        assert_eq!(keywords, vec!["physics", "exam", "tomorrow", "revision"]);
    }

    #[test]
    fn test_respects_limit() {
        let keywords = extract_keywords("alpha bravo charlie delta echo foxtrot golf hotel", 3);
        assert_eq!(keywords, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_drops_short_tokens_and_stopwords() {
        let keywords = extract_keywords("I am so tired and it is a lot", 6);
        assert_eq!(keywords, vec!["tired"]);
    }

    #[test]
    fn test_apostrophes_are_trimmed() {
        let keywords = extract_keywords("'deadline' isn't scary", 6);
        assert_eq!(keywords, vec!["deadline", "isn't", "scary"]);
    }

    #[test]
    fn test_placeholder_for_empty_input() {
        assert!(extract_keywords("   ", 6).is_empty());
        assert_eq!(topic_summary("", 6), TOPIC_PLACEHOLDER);
        assert_eq!(topic_summary("the and but", 6), TOPIC_PLACEHOLDER);
    }

    #[test]
    fn test_topic_summary_joins_keywords() {
        assert_eq!(topic_summary("Gym session, then emails", 6), "gym, session, emails");
    }

    #[test]
    fn test_unicode_words_are_kept() {
        assert_eq!(extract_keywords("révision du théorème", 6), vec!["révision", "théorème"]);
    }
}

//! Lightweight message analysis: entities, question shape, keywords, and
//! sentiment. Feeds the optional analysis argument of the context tracker.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use nailaide_core::{Intent, QuestionType, Sentiment};

use crate::types::MessageAnalysis;

// =============================================================================
// Patterns
// =============================================================================

static SERVICE_TYPES: &[&str] = &[
    "manicure", "pedicure", "gel", "polish", "nail art", "facial", "wellness", "spa", "massage",
    "treatment",
];

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"\b(?:today|tomorrow|{})\b", WEEKDAYS),
        format!(r"\b(?:next|this) (?:week|month|{})\b", WEEKDAYS),
        r"\b\d{1,2}[-/]\d{1,2}(?:[-/]\d{2,4})?\b".to_string(),
        r"\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(?:st|nd|rd|th)?\b".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid date regex"))
    .collect()
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{1,2}:\d{2}\s*(?:am|pm)?\b",
        r"\b\d{1,2}\s*(?:am|pm)\b",
        r"\b(?:morning|afternoon|evening|night)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid time regex"))
    .collect()
});

static PEOPLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:me and|with|for) (?:\d+|my|a|one|two|three|four|five) (?:people|person|friend|friends|family|guest|guests)\b",
        r"\bgroup of (?:\d+|a few|several)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid people regex"))
    .collect()
});

// Checked in order; first match wins.
static QUESTION_TYPE_PATTERNS: LazyLock<Vec<(QuestionType, Regex)>> = LazyLock::new(|| {
    [
        (QuestionType::What, r"\b(?:what|which)\b"),
        (QuestionType::Where, r"\b(?:where|location)\b"),
        (QuestionType::When, r"\b(?:when|time|hours)\b"),
        (QuestionType::How, r"\b(?:how|process)\b"),
        (QuestionType::Why, r"\b(?:why|reason)\b"),
        (QuestionType::Who, r"\b(?:who|staff|technician)\b"),
        (QuestionType::Possibility, r"\b(?:can i|is it possible)\b"),
    ]
    .into_iter()
    .map(|(t, p)| (t, Regex::new(p).expect("Invalid question type regex")))
    .collect()
});

static STOP_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "can", "will", "just", "should", "now",
];

static POSITIVE_WORDS: &[&str] = &[
    "love", "great", "good", "awesome", "amazing", "wonderful", "excellent", "perfect", "happy",
    "thanks", "thank", "beautiful", "nice", "appreciate", "fantastic", "glad",
];

static NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "angry", "upset", "disappointed", "worst", "horrible",
    "poor", "rude", "unhappy", "problem", "complaint", "dirty", "painful",
];

// =============================================================================
// MessageAnalyzer
// =============================================================================

/// Stateless analyzer producing [`MessageAnalysis`] records.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageAnalyzer;

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze `message` classified as `intent`. Any intent other than
    /// `Unknown` counts as answered until a reply says otherwise; the
    /// orchestrator overwrites `answered` from [`ChatReply::answered`].
    ///
    /// [`ChatReply::answered`]: crate::types::ChatReply::answered
    pub fn analyze(&self, message: &str, intent: Intent) -> MessageAnalysis {
        MessageAnalysis {
            intent: Some(intent),
            entities: self.detect_entities(message),
            sentiment: Some(self.sentiment(message)),
            question_type: Some(self.question_type(message)),
            answered: intent != Intent::Unknown,
            original_message: message.to_string(),
        }
    }

    /// Entity type to first-match values. Empty categories are omitted.
    pub fn detect_entities(&self, message: &str) -> BTreeMap<String, Vec<String>> {
        let lower = message.to_lowercase();
        let mut entities = BTreeMap::new();

        let services: Vec<String> = SERVICE_TYPES
            .iter()
            .filter(|s| lower.contains(*s))
            .map(|s| s.to_string())
            .collect();
        let first_matches = |patterns: &[Regex]| -> Vec<String> {
            patterns
                .iter()
                .filter_map(|re| re.find(&lower))
                .map(|m| m.as_str().to_string())
                .collect()
        };

        for (key, values) in [
            ("service_types", services),
            ("dates", first_matches(DATE_PATTERNS.as_slice())),
            ("times", first_matches(TIME_PATTERNS.as_slice())),
            ("people", first_matches(PEOPLE_PATTERNS.as_slice())),
        ] {
            if !values.is_empty() {
                entities.insert(key.to_string(), values);
            }
        }
        entities
    }

    pub fn question_type(&self, message: &str) -> QuestionType {
        let lower = message.to_lowercase();
        QUESTION_TYPE_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(&lower))
            .map(|(t, _)| *t)
            .unwrap_or(if lower.contains('?') {
                QuestionType::GeneralQuestion
            } else {
                QuestionType::Statement
            })
    }

    /// Content words longer than two characters, most frequent first. Ties
    /// keep first-appearance order.
    pub fn extract_keywords(&self, message: &str) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in words(message) {
            if word.chars().count() <= 2 || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            let count = counts.entry(word.clone()).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }
        // Stable sort keeps first appearance among equal counts.
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order
    }

    /// Lexicon vote. Ties are neutral.
    pub fn sentiment(&self, message: &str) -> Sentiment {
        let (mut positive, mut negative) = (0usize, 0usize);
        for word in words(message) {
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

/// Lower-cased words with punctuation removed ("don't" -> "dont").
fn words(message: &str) -> impl Iterator<Item = String> + '_ {
    message.split_whitespace().filter_map(|raw| {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        (!word.is_empty()).then_some(word)
    })
}

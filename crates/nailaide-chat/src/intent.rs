//! Keyword-scoring intent classifier.
//!
//! Each intent owns a keyword list. A message scores one point per keyword
//! it contains, informational intents get a half-point boost when the
//! message reads as a question, and a handful of phrase lists override the
//! keyword winner for topics the general keywords tend to miss.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use nailaide_core::Intent;

use crate::types::Classification;

// =============================================================================
// Keyword tables
// =============================================================================

struct IntentPattern {
    intent: Intent,
    keywords: &'static [&'static str],
    threshold: u32,
}

// Table order decides ties.
static PATTERNS: &[IntentPattern] = &[
    IntentPattern {
        intent: Intent::Greeting,
        keywords: &["hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Booking,
        keywords: &["book", "appointment", "schedule", "reservation", "booking", "reserve"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::ServiceInquiry,
        keywords: &["service", "treatment", "offer", "manicure", "pedicure", "facial", "nail", "spa"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Pricing,
        keywords: &["price", "cost", "fee", "how much", "expensive", "cheap"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Hours,
        keywords: &["hour", "time", "open", "close", "schedule", "when"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Location,
        keywords: &["location", "address", "where", "place", "building", "direction"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::FindInformation,
        keywords: &["info", "about", "tell me about", "what is", "details", "information"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Farewell,
        keywords: &["bye", "goodbye", "see you", "talk later", "thanks"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Help,
        keywords: &["help", "assist", "support", "guidance", "confused"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::Navigation,
        keywords: &["go to", "navigate", "show me", "take me to", "page"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::ProductInquiry,
        keywords: &[
            "product", "polish", "buy", "purchase", "sell", "sale", "online", "shop", "truth", "freedom",
        ],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::DnncInquiry,
        keywords: &["dnnc", "steps to success", "nonprofit", "charity", "vision 2025", "initiative"],
        threshold: 1,
    },
    IntentPattern {
        intent: Intent::AdvancedPedicure,
        keywords: &[
            "advanced pedicure",
            "therapeutic",
            "diabetic",
            "foot health",
            "athlete",
            "special pedicure",
        ],
        threshold: 1,
    },
];

const QUESTION_BOOST: f32 = 0.5;

/// A booking override only applies when the keyword winner scored below this.
const BOOKING_OVERRIDE_CEILING: f32 = 2.0;

static BOOKING_PHRASES: &[&str] = &[
    "want to book",
    "need an appointment",
    "schedule a",
    "get my nails done",
    "make a reservation",
    "book me",
    "available time",
    "available slot",
    "appointment time",
    "when can i come in",
];

static PRODUCT_KEYWORDS: &[&str] = &[
    "products",
    "sell",
    "purchase",
    "buy",
    "online shop",
    "truth freedom",
    "polish",
    "strengthener",
    "cuticle oil",
    "hand cream",
    "nail care",
    "at home",
    "retail",
    "new products",
];

static DNNC_KEYWORDS: &[&str] = &[
    "dnnc",
    "steps to success",
    "vision 2025",
    "nonprofit",
    "women empowerment",
    "mentorship",
    "initiative",
    "charity",
];

static ADVANCED_PEDICURE_KEYWORDS: &[&str] = &[
    "advanced pedicure",
    "therapeutic",
    "diabetic foot",
    "foot health",
    "athlete pedicure",
    "special pedicure",
];

static QUESTION_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:what|where|when|how|who|why|is|are|can|could|do|does|did)\b")
        .expect("Invalid question regex")
});

fn contains_any(lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lower.contains(p))
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// Stateless rule-based intent classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `message` into a single intent.
    pub fn detect_intent(&self, message: &str) -> Intent {
        self.classify(message).intent
    }

    /// Classify `message`, keeping the intermediate scores.
    pub fn classify(&self, message: &str) -> Classification {
        let lower = message.trim().to_lowercase();
        if lower.is_empty() {
            return Classification {
                keyword_intent: Intent::Unknown,
                keyword_score: 0.0,
                intent: Intent::Unknown,
                scores: Vec::new(),
                is_question: false,
            };
        }

        let is_question = is_question_lower(&lower);

        let mut scores = Vec::with_capacity(PATTERNS.len());
        let mut best = Intent::Unknown;
        let mut best_score = 0.0f32;
        for pattern in PATTERNS {
            let mut score = pattern
                .keywords
                .iter()
                .filter(|k| lower.contains(*k))
                .count() as f32;
            if is_question && pattern.intent.is_informational() {
                score += QUESTION_BOOST;
            }
            if score >= pattern.threshold as f32 && score > best_score {
                best = pattern.intent;
                best_score = score;
            }
            scores.push((pattern.intent, score));
        }

        let mut intent = if contains_any(&lower, PRODUCT_KEYWORDS) {
            Intent::ProductInquiry
        } else if contains_any(&lower, DNNC_KEYWORDS) {
            Intent::DnncInquiry
        } else if contains_any(&lower, ADVANCED_PEDICURE_KEYWORDS) {
            Intent::AdvancedPedicure
        } else if contains_any(&lower, BOOKING_PHRASES)
            && (best == Intent::Unknown || best_score < BOOKING_OVERRIDE_CEILING)
        {
            Intent::Booking
        } else {
            best
        };

        if intent == Intent::Unknown && is_question {
            intent = Intent::FindInformation;
        }

        debug!(
            keyword_intent = %best,
            keyword_score = best_score,
            intent = %intent,
            is_question,
            "Classified message"
        );

        Classification {
            keyword_intent: best,
            keyword_score: best_score,
            intent,
            scores,
            is_question,
        }
    }

    /// Contains `?` or opens with an interrogative word.
    pub fn is_question(&self, message: &str) -> bool {
        is_question_lower(&message.trim().to_lowercase())
    }

    pub fn has_booking_intent(&self, message: &str) -> bool {
        contains_any(&message.to_lowercase(), BOOKING_PHRASES)
    }

    pub fn contains_product_keywords(&self, message: &str) -> bool {
        contains_any(&message.to_lowercase(), PRODUCT_KEYWORDS)
    }

    pub fn contains_dnnc_keywords(&self, message: &str) -> bool {
        contains_any(&message.to_lowercase(), DNNC_KEYWORDS)
    }

    pub fn contains_advanced_pedicure_keywords(&self, message: &str) -> bool {
        contains_any(&message.to_lowercase(), ADVANCED_PEDICURE_KEYWORDS)
    }
}

fn is_question_lower(lower: &str) -> bool {
    lower.contains('?') || QUESTION_START_RE.is_match(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    fn score_of(c: &Classification, intent: Intent) -> f32 {
        c.scores
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, s)| *s)
            .unwrap()
    }

    // ---- Empty input ----

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(classifier().detect_intent(""), Intent::Unknown);
        assert_eq!(classifier().detect_intent("   \n\t"), Intent::Unknown);
    }

    // ---- Keyword table ----

    #[test]
    fn test_greeting() {
        assert_eq!(classifier().detect_intent("Hello"), Intent::Greeting);
        assert_eq!(classifier().detect_intent("good evening!"), Intent::Greeting);
    }

    #[test]
    fn test_farewell() {
        assert_eq!(classifier().detect_intent("ok, goodbye"), Intent::Farewell);
    }

    #[test]
    fn test_pricing_beats_service_on_question() {
        let c = classifier().classify("How much does a gel manicure cost?");
        assert!(c.is_question);
        assert_eq!(score_of(&c, Intent::Pricing), 2.5);
        assert_eq!(score_of(&c, Intent::ServiceInquiry), 1.5);
        assert_eq!(c.intent, Intent::Pricing);
    }

    #[test]
    fn test_tie_keeps_table_order() {
        // "schedule" counts for both booking and hours; booking comes first.
        let c = classifier().classify("schedule");
        assert_eq!(score_of(&c, Intent::Booking), 1.0);
        assert_eq!(score_of(&c, Intent::Hours), 1.0);
        assert_eq!(c.intent, Intent::Booking);
    }

    #[test]
    fn test_boost_alone_does_not_meet_threshold() {
        let c = classifier().classify("why?");
        assert_eq!(c.keyword_intent, Intent::Unknown);
        assert_eq!(score_of(&c, Intent::Pricing), 0.5);
        assert_eq!(c.intent, Intent::FindInformation);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classifier().detect_intent("WHERE IS YOUR ADDRESS"), Intent::Location);
    }

    // ---- Overrides ----

    #[test]
    fn test_product_override_beats_booking() {
        assert_eq!(
            classifier().detect_intent("I want to book a polish change"),
            Intent::ProductInquiry
        );
    }

    #[test]
    fn test_dnnc_override() {
        assert_eq!(
            classifier().detect_intent("Tell me about the mentorship program"),
            Intent::DnncInquiry
        );
    }

    #[test]
    fn test_advanced_pedicure_override() {
        let c = classifier().classify("Do you offer a diabetic foot pedicure?");
        assert_eq!(c.keyword_intent, Intent::ServiceInquiry);
        assert_eq!(c.intent, Intent::AdvancedPedicure);
    }

    #[test]
    fn test_booking_phrase_override_when_winner_weak() {
        // Keyword winner is service_inquiry with 1 point; phrase forces booking.
        let c = classifier().classify("get my nails done");
        assert_eq!(c.keyword_intent, Intent::ServiceInquiry);
        assert_eq!(c.intent, Intent::Booking);
    }

    #[test]
    fn test_booking_phrase_ignored_when_winner_strong() {
        // service_inquiry scores 3 (nail, manicure, pedicure).
        let c = classifier().classify("get my nails done, manicure and pedicure");
        assert_eq!(c.keyword_score, 3.0);
        assert_eq!(c.intent, Intent::ServiceInquiry);
    }

    #[test]
    fn test_book_me_a_manicure() {
        let c = classifier().classify("book me a manicure");
        assert!(classifier().has_booking_intent("book me a manicure"));
        assert_eq!(c.intent, Intent::Booking);
    }

    #[test]
    fn test_want_to_book_pedicure() {
        assert_eq!(
            classifier().detect_intent("I want to book a pedicure"),
            Intent::Booking
        );
    }

    // ---- Question detection ----

    #[test]
    fn test_is_question_by_mark_or_leading_word() {
        assert!(classifier().is_question("open saturday?"));
        assert!(classifier().is_question("Can I bring my daughter"));
        assert!(classifier().is_question("what's new"));
        assert!(!classifier().is_question("island vacation"));
        assert!(!classifier().is_question("I love it"));
    }

    #[test]
    fn test_unmatched_question_falls_back_to_find_information() {
        assert_eq!(
            classifier().detect_intent("Can my husband come too?"),
            Intent::FindInformation
        );
    }

    #[test]
    fn test_unmatched_statement_is_unknown() {
        assert_eq!(classifier().detect_intent("blue skies ahead"), Intent::Unknown);
    }

    #[test]
    fn test_scores_cover_every_pattern() {
        let c = classifier().classify("hello");
        assert_eq!(c.scores.len(), 13);
        assert_eq!(c.scores[0].0, Intent::Greeting);
        assert_eq!(c.scores[12].0, Intent::AdvancedPedicure);
    }
}

//! FAQ retrieval by phrase and token overlap.

use chrono::Weekday;
use rand::Rng;

use nailaide_knowledge::FaqEntry;

use crate::types::{FaqAnswer, FaqMatch};

const PHRASE_IN_QUESTION: u32 = 100;
const PHRASE_IN_ANSWER: u32 = 50;
const TOKEN_IN_QUESTION: u32 = 10;
const TOKEN_IN_ANSWER: u32 = 5;

pub const DEFAULT_MAX_RESULTS: usize = 3;

static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "in", "to", "for", "with", "on", "at",
    "from", "by", "about", "as", "of", "be", "do", "you", "your", "my", "i", "we", "they", "it",
];

// Indices into the shipped corpus of the FAQs worth volunteering unprompted.
const KEY_FAQS: &[usize] = &[0, 1, 4, 8];

/// Split on non-word characters, dropping one-letter tokens and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Scores a query against a fixed FAQ corpus.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    max_results: usize,
}

impl FaqMatcher {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Best-scoring entries for `query`, highest first. Zero scores are
    /// dropped; equal scores keep corpus order. Phrase containment uses the
    /// query as given, surrounding whitespace included.
    pub fn find_matching_faqs(&self, query: &str, max_results: usize) -> Vec<FaqMatch> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query_lower = query.to_lowercase();
        let query_terms = tokenize(&query_lower);

        let mut scored: Vec<FaqMatch> = self
            .entries
            .iter()
            .filter_map(|faq| {
                let question_lower = faq.question.to_lowercase();
                let answer_lower = faq.answer.to_lowercase();
                let question_terms = tokenize(&question_lower);
                let answer_terms = tokenize(&answer_lower);

                let mut score = 0;
                if question_lower.contains(&query_lower) {
                    score += PHRASE_IN_QUESTION;
                }
                if answer_lower.contains(&query_lower) {
                    score += PHRASE_IN_ANSWER;
                }
                for term in &query_terms {
                    if question_terms.contains(term) {
                        score += TOKEN_IN_QUESTION;
                    }
                    if answer_terms.contains(term) {
                        score += TOKEN_IN_ANSWER;
                    }
                }

                (score > 0).then(|| FaqMatch {
                    question: faq.question.clone(),
                    answer: faq.answer.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(max_results);
        scored
    }

    /// Answer text for a set of matches: the top answer, followed by the
    /// other matched questions when there are several.
    pub fn format_faq_response(&self, matches: &[FaqMatch]) -> Option<String> {
        let (top, rest) = matches.split_first()?;
        if rest.is_empty() {
            return Some(top.answer.clone());
        }
        let mut response = top.answer.clone();
        response.push_str("\n\nI can also share more information about:");
        for other in rest {
            response.push_str("\n\u{2022} ");
            response.push_str(&other.question);
        }
        response.push_str("\n\nWould you like to know more about any of these?");
        Some(response)
    }

    pub fn process_question(&self, query: &str) -> FaqAnswer {
        let matches = self.find_matching_faqs(query, self.max_results);
        let Some(top) = matches.first() else {
            return FaqAnswer::default();
        };
        FaqAnswer {
            has_answer: true,
            direct_answer: Some(top.answer.clone()),
            formatted_response: self.format_faq_response(&matches),
            matched_questions: matches.iter().map(|m| m.question.clone()).collect(),
            confidence: top.score as f32 / 100.0,
        }
    }

    /// An FAQ worth volunteering at this point of the week. Friday and
    /// Saturday afternoons suggest booking ahead, weekday mornings suggest
    /// walk-ins, and other times pick one of the key FAQs at random.
    pub fn top_faq_for<R: Rng>(
        &self,
        weekday: Weekday,
        hour: u32,
        rng: &mut R,
    ) -> Option<&FaqEntry> {
        let find = |needle: &str| self.entries.iter().find(|f| f.question.contains(needle));

        let weekend_rush = matches!(weekday, Weekday::Fri | Weekday::Sat) && hour >= 15;
        let weekday_morning =
            !matches!(weekday, Weekday::Sat | Weekday::Sun) && hour < 12;

        if weekend_rush {
            if let Some(faq) = find("advance should I book") {
                return Some(faq);
            }
        } else if weekday_morning {
            if let Some(faq) = find("walk-ins") {
                return Some(faq);
            }
        }

        let candidates: Vec<&FaqEntry> = KEY_FAQS
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .collect();
        if candidates.is_empty() {
            return self.entries.first();
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nailaide_knowledge::KnowledgeStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn matcher() -> FaqMatcher {
        FaqMatcher::new(KnowledgeStore::new().faqs().to_vec())
    }

    // ---- Tokenizer ----

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        assert_eq!(
            tokenize("What is your cancellation policy?"),
            vec!["what", "cancellation", "policy"]
        );
        assert_eq!(tokenize("walk-ins"), vec!["walk", "ins"]);
        assert!(tokenize("a I it").is_empty());
    }

    // ---- Matching ----

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(matcher().find_matching_faqs("", 3).is_empty());
        assert!(matcher().find_matching_faqs("   ", 3).is_empty());
    }

    #[test]
    fn test_exact_question_ranks_first() {
        let m = matcher();
        let hits = m.find_matching_faqs("What is your cancellation policy?", 3);
        assert_eq!(hits[0].question, "What is your cancellation policy?");
        // +100 phrase, +10 each for what/cancellation/policy.
        assert_eq!(hits[0].score, 130);
        assert!(hits.len() <= 3);
    }

    #[test]
    fn test_every_stored_question_ranks_itself_first() {
        let m = matcher();
        for entry in m.entries() {
            let hits = m.find_matching_faqs(&entry.question, 3);
            assert_eq!(hits[0].question, entry.question);
        }
    }

    #[test]
    fn test_answer_phrase_scores() {
        let m = matcher();
        let hits = m.find_matching_faqs("apple pay", 3);
        assert_eq!(hits[0].question, "What payment methods do you accept?");
        // +50 phrase in answer, +5 each for apple/pay in answer.
        assert_eq!(hits[0].score, 60);
    }

    #[test]
    fn test_padded_query_scores_tokens_only() {
        let m = matcher();
        let hits = m.find_matching_faqs("  cancellation policy  ", 3);
        assert_eq!(hits[0].question, "What is your cancellation policy?");
        // No phrase hit: the padding is not in the question. +10 per token.
        assert_eq!(hits[0].score, 20);

        let hits = m.find_matching_faqs("cancellation policy", 3);
        assert_eq!(hits[0].score, 120);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(matcher().find_matching_faqs("zzz qqq", 3).is_empty());
    }

    #[test]
    fn test_max_results_respected() {
        let hits = matcher().find_matching_faqs("nail services", 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
    }

    // ---- Formatting ----

    #[test]
    fn test_format_single_and_multiple() {
        let m = matcher();
        assert_eq!(m.format_faq_response(&[]), None);

        let one = FaqMatch {
            question: "Q1?".to_string(),
            answer: "A1.".to_string(),
            score: 10,
        };
        assert_eq!(m.format_faq_response(std::slice::from_ref(&one)).as_deref(), Some("A1."));

        let two = FaqMatch {
            question: "Q2?".to_string(),
            answer: "A2.".to_string(),
            score: 5,
        };
        assert_eq!(
            m.format_faq_response(&[one, two]).unwrap(),
            "A1.\n\nI can also share more information about:\n\u{2022} Q2?\n\nWould you like to know more about any of these?"
        );
    }

    #[test]
    fn test_process_question_confidence_unclamped() {
        let answer = matcher().process_question("What is your cancellation policy?");
        assert!(answer.has_answer);
        assert!(answer
            .direct_answer
            .unwrap()
            .starts_with("We request at least 24 hours notice"));
        assert!((answer.confidence - 1.3).abs() < 1e-6);
        assert_eq!(answer.matched_questions[0], "What is your cancellation policy?");
    }

    #[test]
    fn test_process_question_without_match() {
        let answer = matcher().process_question("zzz");
        assert!(!answer.has_answer);
        assert_eq!(answer.confidence, 0.0);
        assert!(answer.formatted_response.is_none());
    }

    // ---- Time-aware suggestion ----

    #[test]
    fn test_top_faq_for_time_of_week() {
        let m = matcher();
        let mut rng = StdRng::seed_from_u64(7);

        let faq = m.top_faq_for(Weekday::Sat, 16, &mut rng).unwrap();
        assert_eq!(faq.question, "How far in advance should I book?");

        let faq = m.top_faq_for(Weekday::Tue, 9, &mut rng).unwrap();
        assert_eq!(faq.question, "Do you take walk-ins?");

        let key: Vec<&str> = KEY_FAQS.iter().map(|&i| m.entries()[i].question.as_str()).collect();
        for _ in 0..10 {
            let faq = m.top_faq_for(Weekday::Sun, 13, &mut rng).unwrap();
            assert!(key.contains(&faq.question.as_str()));
        }
    }

    #[test]
    fn test_top_faq_for_empty_corpus() {
        let m = FaqMatcher::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(m.top_faq_for(Weekday::Mon, 9, &mut rng).is_none());
    }
}

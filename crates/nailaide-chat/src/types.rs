//! Data types passed between pipeline stages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use nailaide_core::{Intent, QuestionType, Sentiment, UnansweredQuestion};
use nailaide_knowledge::SitePage;

// =============================================================================
// Classification
// =============================================================================

/// Full result of intent classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Best keyword-table match before overrides (`Unknown` if none).
    pub keyword_intent: Intent,
    pub keyword_score: f32,
    /// Final intent after overrides and the question fallback.
    pub intent: Intent,
    /// Score per pattern, in table order.
    pub scores: Vec<(Intent, f32)>,
    pub is_question: bool,
}

// =============================================================================
// Analysis
// =============================================================================

/// Per-message analysis folded into the session context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageAnalysis {
    pub intent: Option<Intent>,
    /// Entity type ("service_types", "dates", "times", "people") to values.
    pub entities: BTreeMap<String, Vec<String>>,
    pub sentiment: Option<Sentiment>,
    pub question_type: Option<QuestionType>,
    pub answered: bool,
    pub original_message: String,
}

// =============================================================================
// Context
// =============================================================================

/// Read-only view of the conversation state after an incoming message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    pub user_greeting: String,
    pub is_returning_user: bool,
    pub time_since_last_response_ms: Option<i64>,
    pub active_topics: Vec<Intent>,
    pub last_topics: Vec<Intent>,
    pub last_mentioned_entities: BTreeMap<String, Vec<String>>,
    pub current_sentiment: Sentiment,
    pub overall_sentiment: Sentiment,
    pub user_name: Option<String>,
    pub conversation_depth: u32,
    pub unanswered_question: Option<UnansweredQuestion>,
}

impl ContextSnapshot {
    pub fn has_user_name(&self) -> bool {
        self.user_name.is_some()
    }
}

/// Extra information about an outgoing reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseMetadata {
    pub intent: Intent,
    pub answered: bool,
}

/// One user/assistant exchange, as recorded after reply generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange {
    pub intent: Intent,
    pub user: String,
    pub assistant: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// FAQ
// =============================================================================

/// A scored FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqMatch {
    pub question: String,
    pub answer: String,
    pub score: u32,
}

/// Answer built from the best FAQ matches for a question.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FaqAnswer {
    pub has_answer: bool,
    pub direct_answer: Option<String>,
    pub formatted_response: Option<String>,
    pub matched_questions: Vec<String>,
    /// Top score / 100. Not clamped; a strong match exceeds 1.0.
    pub confidence: f32,
}

// =============================================================================
// Reply
// =============================================================================

/// Something the widget should offer alongside the reply text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyAction {
    Navigate { page: SitePage, url: String },
    Book { url: String },
}

/// The assistant's answer to one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub intent: Intent,
    /// False when the reply is a fallback template rather than an answer.
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ReplyAction>,
}

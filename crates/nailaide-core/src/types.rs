use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Classification label assigned to a user message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Booking,
    ServiceInquiry,
    Pricing,
    Hours,
    Location,
    FindInformation,
    Farewell,
    Help,
    Navigation,
    ProductInquiry,
    DnncInquiry,
    AdvancedPedicure,
    Unknown,
}

impl Intent {
    /// Every intent, in keyword-table order, followed by `Unknown`.
    pub const ALL: [Intent; 14] = [
        Intent::Greeting,
        Intent::Booking,
        Intent::ServiceInquiry,
        Intent::Pricing,
        Intent::Hours,
        Intent::Location,
        Intent::FindInformation,
        Intent::Farewell,
        Intent::Help,
        Intent::Navigation,
        Intent::ProductInquiry,
        Intent::DnncInquiry,
        Intent::AdvancedPedicure,
        Intent::Unknown,
    ];

    /// The snake_case tag used in logs and persisted analysis.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Booking => "booking",
            Intent::ServiceInquiry => "service_inquiry",
            Intent::Pricing => "pricing",
            Intent::Hours => "hours",
            Intent::Location => "location",
            Intent::FindInformation => "find_information",
            Intent::Farewell => "farewell",
            Intent::Help => "help",
            Intent::Navigation => "navigation",
            Intent::ProductInquiry => "product_inquiry",
            Intent::DnncInquiry => "dnnc_inquiry",
            Intent::AdvancedPedicure => "advanced_pedicure",
            Intent::Unknown => "unknown",
        }
    }

    /// Intents that receive the question boost during classification.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            Intent::ServiceInquiry
                | Intent::Pricing
                | Intent::Hours
                | Intent::Location
                | Intent::FindInformation
                | Intent::ProductInquiry
                | Intent::DnncInquiry
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .find(|i| i.as_str() == s.trim())
            .copied()
            .ok_or_else(|| format!("unknown intent tag: {}", s))
    }
}

/// Author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Coarse sentiment label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Strict plurality over the given labels. Ties and empty input are neutral.
    pub fn plurality<'a, I>(labels: I) -> Sentiment
    where
        I: IntoIterator<Item = &'a Sentiment>,
    {
        let (mut pos, mut neg, mut neu) = (0usize, 0usize, 0usize);
        for label in labels {
            match label {
                Sentiment::Positive => pos += 1,
                Sentiment::Negative => neg += 1,
                Sentiment::Neutral => neu += 1,
            }
        }
        if pos > neg && pos > neu {
            Sentiment::Positive
        } else if neg > pos && neg > neu {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Shape of a question, used to track unanswered questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    What,
    Where,
    When,
    How,
    Why,
    Who,
    Possibility,
    GeneralQuestion,
    Statement,
}

impl QuestionType {
    pub fn is_question(&self) -> bool {
        !matches!(self, QuestionType::Statement)
    }
}

// =============================================================================
// Conversation structs
// =============================================================================

/// One message in the rolling conversation history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// User-level state that survives across sessions. A new user has
/// `visit_count` 0; each reload of the stored record adds one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub name: Option<String>,
    #[serde(default)]
    pub visit_count: u32,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

/// Serialized form of the user context in durable storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedContext {
    pub user: UserContext,
    pub last_saved: DateTime<Utc>,
}

/// A question the assistant could not answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnansweredQuestion {
    pub question: String,
    pub timestamp: DateTime<Utc>,
    pub question_type: QuestionType,
}

/// Per-page-load conversation state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub message_count: u32,
    pub active_topics: BTreeSet<Intent>,
    /// Most recent first.
    pub last_topics: Vec<Intent>,
    pub last_mentioned_entities: BTreeMap<String, Vec<String>>,
    pub sentiment_history: Vec<Sentiment>,
    pub unanswered_questions: Vec<UnansweredQuestion>,
    pub last_response_time: Option<DateTime<Utc>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            start_time: Utc::now(),
            message_count: 0,
            active_topics: BTreeSet::new(),
            last_topics: Vec::new(),
            last_mentioned_entities: BTreeMap::new(),
            sentiment_history: Vec::new(),
            unanswered_questions: Vec::new(),
            last_response_time: None,
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

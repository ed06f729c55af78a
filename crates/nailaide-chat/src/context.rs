//! Conversation context tracking.
//!
//! Owns the rolling turn history, the per-session topic/entity/sentiment
//! state, and the user record that survives across sessions. The user
//! record is read from the key-value store when the tracker starts and
//! written back every few messages and on every preference change. Storage
//! failures are logged and the tracker carries on in memory.

use std::collections::VecDeque;
use std::sync::{Arc, LazyLock};

use chrono::{Local, Timelike, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

use nailaide_core::config::ChatConfig;
use nailaide_core::{
    ConversationTurn, Intent, PersistedContext, Role, Sentiment, SessionContext,
    UnansweredQuestion, UserContext,
};
use nailaide_storage::KeyValueStore;

use crate::types::{ContextSnapshot, Exchange, MessageAnalysis, ResponseMetadata};

const MAX_LAST_TOPICS: usize = 3;
const MAX_SENTIMENT_HISTORY: usize = 10;
const MAX_EXCHANGES: usize = 10;

// =============================================================================
// Name extraction
// =============================================================================

// Tried in order; the first acceptable capture wins.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bmy name is ([a-z]+)",
        r"(?i)\bI['\u{2019}]?m ([a-z]+)",
        r"(?i)\b([a-z]+)\s+here\b",
        r"(?i)\bthis is ([a-z]+)",
        r"(?i)\bcall me ([a-z]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid name regex"))
    .collect()
});

static NAME_STOPLIST: &[&str] = &[
    "hi", "hey", "just", "here", "now", "yes", "no", "maybe", "sure", "ok", "okay",
];

/// Pull a self-introduced name out of `message`.
pub fn extract_user_name(message: &str) -> Option<String> {
    NAME_PATTERNS.iter().find_map(|re| {
        let name = re.captures(message)?.get(1)?.as_str();
        let acceptable =
            name.chars().count() >= 2 && !NAME_STOPLIST.contains(&name.to_lowercase().as_str());
        acceptable.then(|| name.to_string())
    })
}

// =============================================================================
// Topics and greetings
// =============================================================================

static TOPIC_KEYWORDS: &[(&str, &str)] = &[
    ("appointment", "booking"),
    ("schedule", "booking"),
    ("book", "booking"),
    ("service", "services"),
    ("treatment", "services"),
    ("price", "pricing"),
    ("cost", "pricing"),
    ("hour", "business_hours"),
    ("open", "business_hours"),
    ("contact", "contact"),
    ("location", "contact"),
];

/// Coarse conversation topic named by `message`, if any.
pub fn detect_topic(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, topic)| *topic)
}

/// "Good morning" before noon, "Good afternoon" before 18:00, otherwise
/// "Good evening", followed by the name when known.
pub fn time_greeting(hour: u32, name: Option<&str>) -> String {
    let greeting = match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    };
    match name {
        Some(name) => format!("{}, {}", greeting, name),
        None => greeting.to_string(),
    }
}

// =============================================================================
// ContextTracker
// =============================================================================

/// Single owner of user and session state for one conversation.
pub struct ContextTracker {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    history_limit: usize,
    persist_every: u32,
    user: UserContext,
    session: SessionContext,
    history: VecDeque<ConversationTurn>,
    last_intent: Option<Intent>,
    topic: Option<&'static str>,
    exchanges: VecDeque<Exchange>,
}

impl ContextTracker {
    /// Start a session, restoring the user record from `store`.
    pub fn start(store: Arc<dyn KeyValueStore>, config: &ChatConfig) -> Self {
        let user = load_user(store.as_ref(), &config.storage_key);
        let session = SessionContext::new();
        info!(
            session_id = %session.session_id,
            visit_count = user.visit_count,
            "Conversation session started"
        );

        Self {
            store,
            storage_key: config.storage_key.clone(),
            history_limit: config.history_limit.max(1),
            persist_every: config.persist_every,
            user,
            session,
            history: VecDeque::new(),
            last_intent: None,
            topic: None,
            exchanges: VecDeque::new(),
        }
    }

    /// Record a user message and return the updated context.
    pub fn process_incoming_message(
        &mut self,
        text: &str,
        analysis: Option<&MessageAnalysis>,
    ) -> ContextSnapshot {
        self.session.message_count += 1;
        self.push_turn(Role::User, text);

        if self.user.name.is_none() {
            if let Some(name) = extract_user_name(text) {
                info!(name = %name, "Extracted user name");
                self.user.name = Some(name);
            }
        }

        if let Some(analysis) = analysis {
            self.apply_analysis(analysis);
        }

        self.snapshot()
    }

    /// Record an assistant reply. Persists the user record every
    /// `persist_every` messages.
    pub fn process_outgoing_response(&mut self, text: &str, metadata: Option<&ResponseMetadata>) {
        self.push_turn(Role::Assistant, text);
        self.session.last_response_time = Some(Utc::now());

        if let Some(meta) = metadata {
            debug!(intent = %meta.intent, answered = meta.answered, "Reply recorded");
            self.last_intent = Some(meta.intent);
        }

        if self.persist_every > 0 && self.session.message_count % self.persist_every == 0 {
            self.persist();
        }
    }

    /// Store a preference and persist immediately.
    pub fn set_user_preference(&mut self, category: &str, value: &str) {
        self.user
            .preferences
            .insert(category.to_string(), value.to_string());
        debug!(category, value, "Set user preference");
        self.persist();
    }

    pub fn get_user_preference(&self, category: &str, default: Option<&str>) -> Option<String> {
        self.user
            .preferences
            .get(category)
            .cloned()
            .or_else(|| default.map(str::to_string))
    }

    /// Remember the last exchange and refresh the coarse topic.
    pub fn record_exchange(&mut self, intent: Intent, message: &str, response: &str) {
        self.last_intent = Some(intent);
        if let Some(topic) = detect_topic(message) {
            self.topic = Some(topic);
        }
        self.exchanges.push_back(Exchange {
            intent,
            user: message.to_string(),
            assistant: response.to_string(),
            timestamp: Utc::now(),
        });
        while self.exchanges.len() > MAX_EXCHANGES {
            self.exchanges.pop_front();
        }
    }

    /// Current state as seen by reply generation.
    pub fn snapshot(&self) -> ContextSnapshot {
        let history = &self.session.sentiment_history;
        ContextSnapshot {
            user_greeting: self.greeting(),
            is_returning_user: self.user.visit_count > 1,
            time_since_last_response_ms: self
                .session
                .last_response_time
                .map(|t| (Utc::now() - t).num_milliseconds()),
            active_topics: self.session.active_topics.iter().copied().collect(),
            last_topics: self.session.last_topics.clone(),
            last_mentioned_entities: self.session.last_mentioned_entities.clone(),
            current_sentiment: history.last().copied().unwrap_or_default(),
            overall_sentiment: Sentiment::plurality(history),
            user_name: self.user.name.clone(),
            conversation_depth: self.session.message_count,
            unanswered_question: self.session.unanswered_questions.last().cloned(),
        }
    }

    /// Time-of-day greeting for the local clock.
    pub fn greeting(&self) -> String {
        time_greeting(Local::now().hour(), self.user.name.as_deref())
    }

    /// Write the user record to the store. Failures are logged only.
    pub fn persist(&self) {
        let record = PersistedContext {
            user: self.user.clone(),
            last_saved: Utc::now(),
        };
        let result = serde_json::to_string(&record)
            .map_err(nailaide_core::NailAideError::from)
            .and_then(|json| self.store.set(&self.storage_key, &json));
        match result {
            Ok(()) => debug!(key = %self.storage_key, "Persisted user context"),
            Err(e) => warn!(key = %self.storage_key, error = %e, "Failed to persist user context"),
        }
    }

    // ---- Accessors ----

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn history(&self) -> &VecDeque<ConversationTurn> {
        &self.history
    }

    pub fn last_intent(&self) -> Option<Intent> {
        self.last_intent
    }

    pub fn topic(&self) -> Option<&'static str> {
        self.topic
    }

    pub fn exchanges(&self) -> &VecDeque<Exchange> {
        &self.exchanges
    }

    // ---- Internals ----

    fn push_turn(&mut self, role: Role, text: &str) {
        self.history.push_back(ConversationTurn::new(role, text));
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    fn apply_analysis(&mut self, analysis: &MessageAnalysis) {
        if let Some(intent) = analysis.intent {
            self.session.active_topics.insert(intent);
            self.session.last_topics.insert(0, intent);
            self.session.last_topics.truncate(MAX_LAST_TOPICS);
        }

        for (kind, values) in &analysis.entities {
            let known = self
                .session
                .last_mentioned_entities
                .entry(kind.clone())
                .or_default();
            for value in values {
                if !known.contains(value) {
                    known.push(value.clone());
                }
            }
        }

        if let Some(sentiment) = analysis.sentiment {
            let history = &mut self.session.sentiment_history;
            history.push(sentiment);
            if history.len() > MAX_SENTIMENT_HISTORY {
                history.remove(0);
            }
        }

        if let Some(question_type) = analysis.question_type {
            if question_type.is_question() && !analysis.answered {
                self.session.unanswered_questions.push(UnansweredQuestion {
                    question: analysis.original_message.clone(),
                    timestamp: Utc::now(),
                    question_type,
                });
            }
        }
    }
}

impl std::fmt::Debug for ContextTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextTracker")
            .field("session_id", &self.session.session_id)
            .field("message_count", &self.session.message_count)
            .field("history_len", &self.history.len())
            .finish()
    }
}

fn load_user(store: &dyn KeyValueStore, key: &str) -> UserContext {
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str::<PersistedContext>(&json) {
            Ok(record) => {
                let mut user = record.user;
                user.visit_count = user.visit_count.saturating_add(1);
                info!(
                    name = user.name.as_deref().unwrap_or("anonymous"),
                    visit_count = user.visit_count,
                    "Loaded persisted user context"
                );
                user
            }
            Err(e) => {
                warn!(key, error = %e, "Persisted user context is corrupt; starting fresh");
                UserContext::default()
            }
        },
        Ok(None) => UserContext::default(),
        Err(e) => {
            warn!(key, error = %e, "Failed to load user context; continuing in memory");
            UserContext::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nailaide_core::error::{NailAideError, Result};
    use nailaide_core::QuestionType;
    use nailaide_storage::MemoryStore;
    use std::collections::BTreeMap;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NailAideError::Storage("unavailable".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(NailAideError::Storage("unavailable".to_string()))
        }
    }

    fn tracker_with(store: Arc<dyn KeyValueStore>) -> ContextTracker {
        ContextTracker::start(store, &ChatConfig::default())
    }

    fn tracker() -> ContextTracker {
        tracker_with(Arc::new(MemoryStore::new()))
    }

    fn analysis(intent: Intent) -> MessageAnalysis {
        MessageAnalysis {
            intent: Some(intent),
            answered: true,
            ..Default::default()
        }
    }

    // ---- Name extraction ----

    #[test]
    fn test_extract_name_patterns() {
        assert_eq!(extract_user_name("my name is Priya").as_deref(), Some("Priya"));
        assert_eq!(extract_user_name("Hi, I'm Dana!").as_deref(), Some("Dana"));
        assert_eq!(extract_user_name("Keisha here, quick question").as_deref(), Some("Keisha"));
        assert_eq!(extract_user_name("Hello, this is Maria").as_deref(), Some("Maria"));
        assert_eq!(extract_user_name("please call me Jo").as_deref(), Some("Jo"));
    }

    #[test]
    fn test_extract_name_rejects_fillers() {
        assert_eq!(extract_user_name("hi there"), None);
        assert_eq!(extract_user_name("I'm just looking"), None);
        assert_eq!(extract_user_name("I'm here"), None);
        assert_eq!(extract_user_name("what are your hours"), None);
    }

    #[test]
    fn test_name_only_set_once() {
        let mut t = tracker();
        t.process_incoming_message("my name is Priya", None);
        t.process_incoming_message("call me Ann", None);
        assert_eq!(t.user().name.as_deref(), Some("Priya"));
    }

    // ---- History ----

    #[test]
    fn test_history_bounded_fifo() {
        let mut t = tracker();
        for i in 1..=25 {
            t.process_incoming_message(&format!("message {}", i), None);
        }
        assert_eq!(t.history().len(), 20);
        assert_eq!(t.history()[0].text, "message 6");
        assert_eq!(t.history()[19].text, "message 25");
    }

    #[test]
    fn test_outgoing_appends_assistant_turn() {
        let mut t = tracker();
        t.process_incoming_message("hello", None);
        t.process_outgoing_response("Hi there!", None);
        assert_eq!(t.history().len(), 2);
        assert_eq!(t.history()[1].role, Role::Assistant);
        assert!(t.session().last_response_time.is_some());
        assert!(t.snapshot().time_since_last_response_ms.is_some());
    }

    // ---- Analysis folding ----

    #[test]
    fn test_last_topics_newest_first_capped() {
        let mut t = tracker();
        for intent in [Intent::Greeting, Intent::Pricing, Intent::Hours, Intent::Booking] {
            t.process_incoming_message("x", Some(&analysis(intent)));
        }
        let snap = t.snapshot();
        assert_eq!(snap.last_topics, vec![Intent::Booking, Intent::Hours, Intent::Pricing]);
        assert_eq!(snap.active_topics.len(), 4);
    }

    #[test]
    fn test_entities_merged_without_duplicates() {
        let mut t = tracker();
        let mut a = analysis(Intent::ServiceInquiry);
        a.entities = BTreeMap::from([("service_types".to_string(), vec!["gel".to_string()])]);
        t.process_incoming_message("gel", Some(&a));
        a.entities = BTreeMap::from([(
            "service_types".to_string(),
            vec!["gel".to_string(), "pedicure".to_string()],
        )]);
        let snap = t.process_incoming_message("gel pedicure", Some(&a));
        assert_eq!(snap.last_mentioned_entities["service_types"], vec!["gel", "pedicure"]);
    }

    #[test]
    fn test_sentiment_history_capped_and_voted() {
        let mut t = tracker();
        for _ in 0..12 {
            let mut a = analysis(Intent::Greeting);
            a.sentiment = Some(Sentiment::Positive);
            t.process_incoming_message("love it", Some(&a));
        }
        let mut a = analysis(Intent::Greeting);
        a.sentiment = Some(Sentiment::Negative);
        let snap = t.process_incoming_message("bad", Some(&a));
        assert_eq!(t.session().sentiment_history.len(), 10);
        assert_eq!(snap.current_sentiment, Sentiment::Negative);
        assert_eq!(snap.overall_sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_unanswered_question_recorded() {
        let mut t = tracker();
        let a = MessageAnalysis {
            intent: Some(Intent::Unknown),
            question_type: Some(QuestionType::GeneralQuestion),
            answered: false,
            original_message: "Do you validate parking?".to_string(),
            ..Default::default()
        };
        let snap = t.process_incoming_message("Do you validate parking?", Some(&a));
        let q = snap.unanswered_question.unwrap();
        assert_eq!(q.question, "Do you validate parking?");
        assert_eq!(q.question_type, QuestionType::GeneralQuestion);

        // Unanswered statements are not questions.
        let a = MessageAnalysis {
            question_type: Some(QuestionType::Statement),
            answered: false,
            ..Default::default()
        };
        t.process_incoming_message("blue skies", Some(&a));
        assert_eq!(t.session().unanswered_questions.len(), 1);
    }

    // ---- Greeting ----

    #[test]
    fn test_time_greeting_boundaries() {
        assert_eq!(time_greeting(0, None), "Good morning");
        assert_eq!(time_greeting(11, None), "Good morning");
        assert_eq!(time_greeting(12, None), "Good afternoon");
        assert_eq!(time_greeting(17, Some("Priya")), "Good afternoon, Priya");
        assert_eq!(time_greeting(18, None), "Good evening");
        assert_eq!(time_greeting(23, Some("Jo")), "Good evening, Jo");
    }

    // ---- Persistence ----

    #[test]
    fn test_fresh_user_has_no_visits() {
        let t = tracker();
        assert_eq!(t.user().visit_count, 0);
        assert!(!t.snapshot().is_returning_user);
    }

    #[test]
    fn test_persist_every_fifth_message_and_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut t = tracker_with(store.clone());
        t.process_incoming_message("my name is Priya", None);
        for i in 1..=4 {
            assert!(store.get("nailaide_user_context").unwrap().is_none(), "saved early at {}", i);
            t.process_outgoing_response("ok", None);
            t.process_incoming_message("more", None);
        }
        t.process_outgoing_response("ok", None);

        let json = store.get("nailaide_user_context").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["user"]["name"], "Priya");
        assert_eq!(value["user"]["visitCount"], 0);
        assert!(value["lastSaved"].is_string());

        let again = tracker_with(store.clone());
        assert_eq!(again.user().visit_count, 1);
        assert!(!again.snapshot().is_returning_user);
        assert_eq!(again.user().name.as_deref(), Some("Priya"));

        // Returning only from the third session on.
        again.persist();
        let third = tracker_with(store);
        assert_eq!(third.user().visit_count, 2);
        assert!(third.snapshot().is_returning_user);
    }

    #[test]
    fn test_preference_persists_immediately() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut t = tracker_with(store.clone());
        t.set_user_preference("service", "gel manicure");
        assert_eq!(t.get_user_preference("service", None).as_deref(), Some("gel manicure"));
        assert_eq!(t.get_user_preference("color", Some("red")).as_deref(), Some("red"));
        assert_eq!(t.get_user_preference("color", None), None);

        let json = store.get("nailaide_user_context").unwrap().unwrap();
        assert!(json.contains("gel manicure"));
    }

    #[test]
    fn test_corrupt_record_starts_fresh() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("nailaide_user_context", "{not json").unwrap();
        let t = tracker_with(store);
        assert_eq!(t.user().visit_count, 0);
        assert!(t.user().name.is_none());
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut t = tracker_with(Arc::new(FailingStore));
        t.set_user_preference("service", "pedicure");
        for _ in 0..5 {
            t.process_incoming_message("hello", None);
            t.process_outgoing_response("hi", None);
        }
        assert_eq!(t.get_user_preference("service", None).as_deref(), Some("pedicure"));
        assert_eq!(t.session().message_count, 5);
    }

    // ---- Exchanges ----

    #[test]
    fn test_record_exchange_topic_and_bound() {
        let mut t = tracker();
        t.record_exchange(Intent::Pricing, "what does it cost", "It depends.");
        assert_eq!(t.topic(), Some("pricing"));
        // No topic keyword keeps the previous topic.
        t.record_exchange(Intent::Greeting, "hello", "Hi!");
        assert_eq!(t.topic(), Some("pricing"));
        assert_eq!(t.last_intent(), Some(Intent::Greeting));

        for i in 0..12 {
            t.record_exchange(Intent::Booking, &format!("book {}", i), "Sure.");
        }
        assert_eq!(t.exchanges().len(), 10);
        assert_eq!(t.topic(), Some("booking"));
        assert_eq!(t.exchanges()[0].user, "book 2");
    }
}

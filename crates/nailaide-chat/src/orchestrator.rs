//! Chat orchestrator: wires classification, analysis, context, and reply
//! generation into one message loop.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use nailaide_core::config::{ChatConfig, NailAideConfig};
use nailaide_core::ConversationTurn;
use nailaide_knowledge::{KnowledgeStore, SiteNavigator};
use nailaide_storage::KeyValueStore;

use crate::analysis::MessageAnalyzer;
use crate::context::ContextTracker;
use crate::error::ChatError;
use crate::intent::IntentClassifier;
use crate::response::ResponseGenerator;
use crate::types::{ChatReply, ResponseMetadata};

/// One visitor's conversation with the assistant.
pub struct ChatOrchestrator {
    classifier: IntentClassifier,
    analyzer: MessageAnalyzer,
    tracker: ContextTracker,
    responder: ResponseGenerator,
    config: ChatConfig,
}

impl ChatOrchestrator {
    /// Start a conversation. The user record is restored from `store`.
    pub fn new(
        config: &NailAideConfig,
        knowledge: Arc<KnowledgeStore>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let tracker = ContextTracker::start(store, &config.chat);
        let responder =
            ResponseGenerator::new(knowledge, SiteNavigator::default(), config.chat.rng_seed);
        let faq = responder
            .faq()
            .clone()
            .with_max_results(config.chat.max_faq_results);

        Self {
            classifier: IntentClassifier::new(),
            analyzer: MessageAnalyzer::new(),
            tracker,
            responder: responder.with_faq_matcher(faq),
            config: config.chat.clone(),
        }
    }

    /// Run one visitor message through the pipeline.
    pub fn handle_message(&mut self, message: &str) -> Result<ChatReply, ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }

        let intent = self.classifier.detect_intent(message);
        // The reply decides whether the question counts as answered, so it
        // is composed before the analysis is folded into the context.
        let reply = self.responder.compose(intent, message);
        let mut analysis = self.analyzer.analyze(message, intent);
        analysis.answered = reply.answered;

        let snapshot = self.tracker.process_incoming_message(message, Some(&analysis));
        debug!(
            intent = %intent,
            depth = snapshot.conversation_depth,
            returning = snapshot.is_returning_user,
            "Processing message"
        );

        self.tracker.record_exchange(intent, message, &reply.text);
        let metadata = ResponseMetadata {
            intent,
            answered: reply.answered,
        };
        self.tracker
            .process_outgoing_response(&reply.text, Some(&metadata));

        info!(
            intent = %intent,
            answered = reply.answered,
            has_action = reply.action.is_some(),
            "Reply generated"
        );
        Ok(reply)
    }

    /// Opening line for the widget, personalised for returning visitors.
    pub fn greeting(&self) -> String {
        let greeting = self.tracker.greeting();
        if self.tracker.user().visit_count > 1 {
            format!("{}! Welcome back to Delane's. How can I help you today?", greeting)
        } else {
            format!(
                "{}! I'm NailAide, the virtual assistant for Delane's Natural Nail Care. How can I help you today?",
                greeting
            )
        }
    }

    pub fn set_preference(&mut self, category: &str, value: &str) {
        self.tracker.set_user_preference(category, value);
    }

    pub fn preference(&self, category: &str) -> Option<String> {
        self.tracker.get_user_preference(category, None)
    }

    pub fn history(&self) -> &VecDeque<ConversationTurn> {
        self.tracker.history()
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn tracker(&self) -> &ContextTracker {
        &self.tracker
    }

    /// Flush the user record to storage.
    pub fn persist(&self) {
        self.tracker.persist();
    }
}

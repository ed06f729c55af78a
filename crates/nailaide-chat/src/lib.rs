//! Conversational pipeline for NailAide.
//!
//! Classifies the intent of a visitor's message, folds it into the
//! conversation context, and builds a reply from the knowledge store and
//! FAQ corpus. Everything is rule-based and synchronous.

pub mod analysis;
pub mod context;
pub mod error;
pub mod faq;
pub mod intent;
pub mod orchestrator;
pub mod response;
pub mod templates;
pub mod types;

pub use analysis::MessageAnalyzer;
pub use context::ContextTracker;
pub use error::ChatError;
pub use faq::FaqMatcher;
pub use intent::IntentClassifier;
pub use orchestrator::ChatOrchestrator;
pub use response::ResponseGenerator;
pub use types::{
    ChatReply, Classification, ContextSnapshot, Exchange, FaqAnswer, FaqMatch, MessageAnalysis,
    ReplyAction, ResponseMetadata,
};

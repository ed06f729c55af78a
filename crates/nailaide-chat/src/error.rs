//! Error types for the chat pipeline.

/// Errors surfaced by [`ChatOrchestrator`](crate::ChatOrchestrator).
///
/// Classification and reply generation never fail and storage problems are
/// logged, so only input validation produces errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}

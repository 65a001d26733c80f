//! Reminder and announcement messages.
//!
//! Message text comes from an external [`MessageGenerator`]. The
//! [`Announcer`] builds the prompts and turns every generator failure into a
//! fixed fallback text, so nothing here can fail the caller or touch the
//! roster state.

mod announcer;
mod link;

use async_trait::async_trait;
use thiserror::Error;

pub use announcer::{
    Announcer, GROUP_EMPTY_FALLBACK, GROUP_ERROR_FALLBACK, group_prompt, individual_fallback,
    individual_prompt,
};
pub use link::whatsapp_link;

/// Failure reported by a message generator.
#[derive(Debug, Error)]
pub enum MessageError {
    /// No generator is configured or reachable.
    #[error("Message generator unavailable: {0}")]
    Unavailable(String),
    /// The generator was reached but returned an error.
    #[error("Message generation failed: {0}")]
    Failed(String),
}

/// Produces free text for a prompt.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generates text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, MessageError>;
}

/// Generator used when no text service is configured; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl MessageGenerator for UnavailableGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, MessageError> {
        Err(MessageError::Unavailable(
            "no message generator configured".to_string(),
        ))
    }
}

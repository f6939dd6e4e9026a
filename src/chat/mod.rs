//! Chat-completion providers used for follow-up questions.

mod kindo;
#[cfg(test)]
pub(crate) mod mock;

pub use kindo::KindoClient;

use crate::error::Result;
use async_trait::async_trait;

/// Outcome of a chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// The provider answered.
    Answer(String),
    /// The provider refused the request; status and body are kept verbatim.
    Rejected { status: u16, body: String },
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send a system message and a user message, returning the provider's outcome.
    async fn complete(&self, system: &str, user: &str) -> Result<ChatOutcome>;
}

/// Provider used when no chat endpoint is configured. Every call fails with the stored reason.
pub struct DisabledChat {
    reason: String,
}

impl DisabledChat {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ChatCompletion for DisabledChat {
    async fn complete(&self, _system: &str, _user: &str) -> Result<ChatOutcome> {
        Err(crate::error::VidbriefError::Config(self.reason.clone()))
    }
}

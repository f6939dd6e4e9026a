//! Recording chat provider used by tests.

use super::{ChatCompletion, ChatOutcome};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;

pub struct MockChat {
    outcome: ChatOutcome,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockChat {
    pub fn answering(answer: &str) -> Self {
        Self::with_outcome(ChatOutcome::Answer(answer.to_string()))
    }

    pub fn with_outcome(outcome: ChatOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (system, user) pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for MockChat {
    async fn complete(&self, system: &str, user: &str) -> Result<ChatOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.outcome.clone())
    }
}

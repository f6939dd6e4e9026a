//! Ask command - follow-up question about a stored summary.

use crate::chat::ChatOutcome;
use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::pipeline::Pipeline;
use anyhow::{bail, Result};

/// Run the ask command.
pub async fn run_ask(name: &str, prompt: &str, settings: Settings, keys: &ApiKeys) -> Result<()> {
    let pipeline = Pipeline::new(settings, keys)?;

    let spinner = Output::spinner("Thinking...");
    let result = pipeline.ask_followup(name, prompt).await;
    spinner.finish_and_clear();

    match result? {
        ChatOutcome::Answer(answer) => {
            println!("{}", answer);
            Ok(())
        }
        ChatOutcome::Rejected { status, body } => {
            bail!("Chat provider returned {}: {}", status, body)
        }
    }
}

//! Query command - run a free-form prompt against an index.

use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the query command and print the written report.
pub async fn run_query(name: &str, prompt: &str, settings: Settings, keys: &ApiKeys) -> Result<()> {
    let pipeline = Pipeline::new(settings, keys)?;

    let spinner = Output::spinner("Generating...");
    let result = pipeline.run_query(name, prompt).await;
    spinner.finish_and_clear();

    let path = result?;
    println!("{}", std::fs::read_to_string(&path)?);
    println!();
    Output::report_written(&path);
    Ok(())
}

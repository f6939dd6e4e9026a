//! Report command - write a summary, chapter or gist report.

use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::pipeline::Pipeline;
use crate::reports::ReportKind;
use anyhow::{bail, Result};

/// Run the report command.
pub async fn run_report(name: &str, kind: &str, settings: Settings, keys: &ApiKeys) -> Result<()> {
    let kind: ReportKind = kind.parse().map_err(anyhow::Error::msg)?;
    let pipeline = Pipeline::new(settings, keys)?;

    let spinner = Output::spinner(&format!("Generating {} for {}...", kind, name));
    let result = match kind {
        ReportKind::Summary => pipeline.write_summary(name).await,
        ReportKind::Chapter => pipeline.write_chapters(name).await,
        ReportKind::Gist => pipeline.write_gist(name).await,
        ReportKind::Highlight | ReportKind::Prompt => {
            spinner.finish_and_clear();
            bail!("Report kind '{}' cannot be generated with this command", kind);
        }
    };
    spinner.finish_and_clear();

    let path = result?;
    Output::report_written(&path);
    Ok(())
}

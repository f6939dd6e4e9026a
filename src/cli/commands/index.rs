//! Index command - create an index and upload local videos.

use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the index command.
pub async fn run_index(name: &str, settings: Settings, keys: &ApiKeys) -> Result<()> {
    let pipeline = Pipeline::new(settings, keys)?;

    let files = pipeline.video_files(name)?;
    if files.is_empty() {
        Output::warning(&format!(
            "No videos found in {}",
            pipeline.settings().videos_dir().join(name).display()
        ));
    } else {
        Output::info(&format!("Uploading {} video(s) to index {}", files.len(), name));
    }

    let spinner = Output::spinner("Creating index...");
    let result = pipeline
        .index_videos_with_progress(name, |file, task| {
            Output::task_progress(&spinner, file, &task.status)
        })
        .await;
    spinner.finish_and_clear();

    let outcome = result?;
    Output::success(&format!("{} indexed.", name));
    Output::field("Index id", &outcome.index.id);
    Output::video_ids(&outcome.video_ids);

    Ok(())
}

//! Terminal output for vidbrief commands.

use crate::twelvelabs::TaskStatus;
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    fn notice(tag: StyledObject<&str>, msg: &str) {
        println!("{} {}", tag, msg);
    }

    fn alert(tag: StyledObject<&str>, msg: &str) {
        eprintln!("{} {}", tag, msg);
    }

    pub fn info(msg: &str) {
        Self::notice(style("[info]").cyan(), msg);
    }

    pub fn success(msg: &str) {
        Self::notice(style("[done]").green().bold(), msg);
    }

    pub fn warning(msg: &str) {
        Self::alert(style("[warn]").yellow().bold(), msg);
    }

    pub fn error(msg: &str) {
        Self::alert(style("[fail]").red().bold(), msg);
    }

    /// Bold section title preceded by a blank line.
    pub fn section(title: &str) {
        println!("\n{}", style(title).bold());
    }

    /// Aligned `key  value` line.
    pub fn field(key: &str, value: &str) {
        println!("  {:<12} {}", style(key).dim(), value);
    }

    /// Location of a freshly written report.
    pub fn report_written(path: &Path) {
        Self::success(&format!("Output written to {}", path.display()));
    }

    /// Endpoint table for the server banner, one `METHOD path` per label.
    pub fn routes(routes: &[(&str, &str)]) {
        for (label, route) in routes {
            let (method, path) = route.split_once(' ').unwrap_or(("", route));
            println!(
                "  {:<12} {:<4} {}",
                style(label).dim(),
                style(method).cyan(),
                path
            );
        }
    }

    /// Uploaded video ids of an index.
    pub fn video_ids(ids: &[String]) {
        for id in ids {
            println!("  {} {}", style("-").cyan(), id);
        }
    }

    /// Spinner ticking until cleared by the caller.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(spinner_style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(SPINNER_TICK);
        pb
    }

    /// Show the latest vendor status of an uploading file on a spinner.
    pub fn task_progress(spinner: &ProgressBar, file: &Path, status: &TaskStatus) {
        spinner.set_message(task_line(file, status));
    }
}

fn task_line(file: &Path, status: &TaskStatus) -> String {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());
    let status = match status {
        TaskStatus::Ready => style(status.to_string()).green(),
        TaskStatus::Failed => style(status.to_string()).red(),
        _ => style(status.to_string()).yellow(),
    };
    format!("{}: {}", file_name, status)
}

//! Flat-file report storage.
//!
//! Every report lives at `{output_dir}/{index_name}_{kind}.out`. Files are
//! created or overwritten synchronously per request; there is no locking.

use crate::error::{Result, VidbriefError};
use crate::twelvelabs::{Chapter, Gist};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kind of report written for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Chapter,
    Highlight,
    Gist,
    Prompt,
}

impl ReportKind {
    /// Suffix used in the report's file name.
    pub fn suffix(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Chapter => "chapter",
            ReportKind::Highlight => "highlight",
            ReportKind::Gist => "gist",
            ReportKind::Prompt => "prompt",
        }
    }

    /// File name of this report for an index.
    pub fn file_name(&self, index_name: &str) -> String {
        format!("{}_{}.out", index_name, self.suffix())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(ReportKind::Summary),
            "chapter" | "chapters" => Ok(ReportKind::Chapter),
            "highlight" | "highlights" => Ok(ReportKind::Highlight),
            "gist" => Ok(ReportKind::Gist),
            "prompt" => Ok(ReportKind::Prompt),
            _ => Err(format!("Unknown report kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Check that an index name is usable as a file stem and directory name.
pub fn validate_index_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VidbriefError::InvalidInput("No index_name provided.".to_string()));
    }
    if trimmed == "." || trimmed == ".." || name.contains(['/', '\\', '\0']) {
        return Err(VidbriefError::InvalidInput(format!(
            "Invalid index name: {}",
            name
        )));
    }
    Ok(())
}

/// Render one chapter as a report line.
pub fn format_chapter(chapter: &Chapter) -> String {
    format!(
        "chapter_number={} chapter_title={} chapter_summary={} start={} end={}",
        chapter.chapter_number,
        chapter.chapter_title,
        chapter.chapter_summary,
        chapter.start,
        chapter.end
    )
}

/// Render a gist as report lines.
pub fn format_gist(video_id: &str, gist: &Gist) -> String {
    format!(
        "video_id={}\nTitle={}\nTopics={}\nHashtags={}",
        video_id,
        gist.title.as_deref().unwrap_or_default(),
        gist.topics.join(", "),
        gist.hashtags.join(" ")
    )
}

/// Directory of report files.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a report for an index.
    pub fn path_for(&self, index_name: &str, kind: ReportKind) -> PathBuf {
        self.dir.join(kind.file_name(index_name))
    }

    /// Create or truncate a report and write `content` to it.
    pub fn write(&self, index_name: &str, kind: ReportKind, content: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(index_name, kind);
        std::fs::write(&path, content)?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }

    /// Append lines to a report, creating it if needed.
    pub fn append(&self, index_name: &str, kind: ReportKind, lines: &[String]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(index_name, kind);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        debug!("Appended {} lines to {}", lines.len(), path.display());
        Ok(path)
    }

    /// Read a report, or None if it was never written.
    pub fn read(&self, index_name: &str, kind: ReportKind) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(index_name, kind)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

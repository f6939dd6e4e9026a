//! Twelve Labs video-understanding API.
//!
//! Provides a trait-based interface over the vendor so the pipeline can be
//! exercised against an in-memory implementation.

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod task;

pub use client::TwelveLabsClient;
pub use task::wait_for_done;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration attached to an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub engine_name: String,
    #[serde(default)]
    pub engine_options: Vec<String>,
}

impl Engine {
    pub fn new(name: &str, options: &[String]) -> Self {
        Self {
            engine_name: name.to_string(),
            engine_options: options.to_vec(),
        }
    }
}

/// A named collection of uploaded videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "index_name")]
    pub name: String,
    #[serde(default)]
    pub engines: Vec<Engine>,
}

/// Metadata the vendor keeps for an indexed video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub filename: Option<String>,
    pub duration: Option<f64>,
}

/// A video inside an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub metadata: VideoMetadata,
}

/// Status of an upload/indexing task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Validating,
    #[default]
    Pending,
    Queued,
    Indexing,
    Ready,
    Failed,
    Other(String),
}

impl TaskStatus {
    /// Whether polling should stop at this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Ready | TaskStatus::Failed)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "validating" => TaskStatus::Validating,
            "pending" => TaskStatus::Pending,
            "queued" => TaskStatus::Queued,
            "indexing" => TaskStatus::Indexing,
            "ready" => TaskStatus::Ready,
            "failed" => TaskStatus::Failed,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Validating => write!(f, "validating"),
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Queued => write!(f, "queued"),
            TaskStatus::Indexing => write!(f, "indexing"),
            TaskStatus::Ready => write!(f, "ready"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// An upload/indexing task for a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Kind of summarization requested from the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizeKind {
    Summary,
    Chapter,
    Highlight,
}

impl std::fmt::Display for SummarizeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizeKind::Summary => write!(f, "summary"),
            SummarizeKind::Chapter => write!(f, "chapter"),
            SummarizeKind::Highlight => write!(f, "highlight"),
        }
    }
}

/// A chapter detected in a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    pub start: f64,
    pub end: f64,
    pub chapter_title: String,
    pub chapter_summary: String,
}

/// A highlight detected in a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub start: f64,
    pub end: f64,
    pub highlight: String,
}

/// Result of a summarize call. Which field is populated depends on the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summarization {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Kinds of gist the vendor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GistType {
    Title,
    Topic,
    Hashtag,
}

/// Title, topics and hashtags for a video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Operations the pipeline needs from the video-understanding vendor.
#[async_trait]
pub trait VideoUnderstanding: Send + Sync {
    /// Create a new index.
    async fn create_index(&self, name: &str, engines: &[Engine]) -> Result<Index>;

    /// Find the first index with the given name.
    async fn find_index(&self, name: &str) -> Result<Option<Index>>;

    /// List the videos of an index.
    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>>;

    /// Upload a local video file into an index.
    async fn create_task(&self, index_id: &str, video_path: &Path, language: &str) -> Result<Task>;

    /// Fetch the current state of a task.
    async fn retrieve_task(&self, task_id: &str) -> Result<Task>;

    /// Summarize a video.
    async fn summarize(&self, video_id: &str, kind: SummarizeKind) -> Result<Summarization>;

    /// Generate a gist for a video.
    async fn gist(&self, video_id: &str, types: &[GistType]) -> Result<Gist>;

    /// Generate free-form text about a video from a prompt.
    async fn generate_text(&self, video_id: &str, prompt: &str) -> Result<String>;
}

//! In-memory video service used by tests.

use super::{
    Chapter, Engine, Gist, GistType, Index, Summarization, SummarizeKind, Task, TaskStatus, Video,
    VideoMetadata, VideoUnderstanding,
};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
struct MockState {
    indexes: Vec<Index>,
    videos: HashMap<String, Vec<Video>>,
    task_statuses: VecDeque<TaskStatus>,
    uploads: Vec<(String, PathBuf, String)>,
    summaries: HashMap<String, String>,
    chapters: HashMap<String, Vec<Chapter>>,
    omit_video_ids: bool,
}

/// Scriptable stand-in for the Twelve Labs API.
#[derive(Default)]
pub struct MockVideoService {
    state: Mutex<MockState>,
}

impl MockVideoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing index holding the given video ids.
    pub fn with_index(self, name: &str, video_ids: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = format!("idx-{}", name);
            state.indexes.push(Index {
                id: id.clone(),
                name: name.to_string(),
                engines: Vec::new(),
            });
            state.videos.insert(
                id,
                video_ids
                    .iter()
                    .map(|v| Video {
                        id: v.to_string(),
                        metadata: VideoMetadata::default(),
                    })
                    .collect(),
            );
        }
        self
    }

    /// Statuses returned by successive `retrieve_task` calls. Once exhausted, tasks are ready.
    pub fn with_task_statuses(self, statuses: &[TaskStatus]) -> Self {
        self.state.lock().unwrap().task_statuses = statuses.iter().cloned().collect();
        self
    }

    /// Ready tasks come back without a video id.
    pub fn without_video_ids(self) -> Self {
        self.state.lock().unwrap().omit_video_ids = true;
        self
    }

    pub fn with_summary(self, video_id: &str, summary: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .summaries
            .insert(video_id.to_string(), summary.to_string());
        self
    }

    pub fn with_chapters(self, video_id: &str, chapters: Vec<Chapter>) -> Self {
        self.state
            .lock()
            .unwrap()
            .chapters
            .insert(video_id.to_string(), chapters);
        self
    }

    /// Uploads seen so far as (index id, file, language).
    pub fn uploads(&self) -> Vec<(String, PathBuf, String)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .indexes
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }
}

#[async_trait]
impl VideoUnderstanding for MockVideoService {
    async fn create_index(&self, name: &str, engines: &[Engine]) -> Result<Index> {
        let mut state = self.state.lock().unwrap();
        let index = Index {
            id: format!("idx-{}", name),
            name: name.to_string(),
            engines: engines.to_vec(),
        };
        state.indexes.push(index.clone());
        Ok(index)
    }

    async fn find_index(&self, name: &str) -> Result<Option<Index>> {
        let state = self.state.lock().unwrap();
        Ok(state.indexes.iter().find(|i| i.name == name).cloned())
    }

    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>> {
        let state = self.state.lock().unwrap();
        Ok(state.videos.get(index_id).cloned().unwrap_or_default())
    }

    async fn create_task(&self, index_id: &str, video_path: &Path, language: &str) -> Result<Task> {
        let mut state = self.state.lock().unwrap();
        state.uploads.push((
            index_id.to_string(),
            video_path.to_path_buf(),
            language.to_string(),
        ));
        Ok(Task {
            id: format!("task-{}", state.uploads.len()),
            index_id: Some(index_id.to_string()),
            video_id: None,
            status: TaskStatus::Pending,
        })
    }

    async fn retrieve_task(&self, task_id: &str) -> Result<Task> {
        let mut state = self.state.lock().unwrap();
        let status = state.task_statuses.pop_front().unwrap_or(TaskStatus::Ready);
        let video_id = (status == TaskStatus::Ready && !state.omit_video_ids)
            .then(|| format!("video-{}", task_id));
        Ok(Task {
            id: task_id.to_string(),
            index_id: None,
            video_id,
            status,
        })
    }

    async fn summarize(&self, video_id: &str, kind: SummarizeKind) -> Result<Summarization> {
        let state = self.state.lock().unwrap();
        Ok(match kind {
            SummarizeKind::Summary => Summarization {
                id: Some(format!("sum-{}", video_id)),
                summary: state.summaries.get(video_id).cloned(),
                ..Default::default()
            },
            SummarizeKind::Chapter => Summarization {
                id: Some(format!("chap-{}", video_id)),
                chapters: state.chapters.get(video_id).cloned().unwrap_or_default(),
                ..Default::default()
            },
            SummarizeKind::Highlight => Summarization::default(),
        })
    }

    async fn gist(&self, video_id: &str, _types: &[GistType]) -> Result<Gist> {
        Ok(Gist {
            id: Some(format!("gist-{}", video_id)),
            title: Some(format!("Title of {}", video_id)),
            topics: vec!["onboarding".to_string(), "payments".to_string()],
            hashtags: vec!["#demo".to_string()],
        })
    }

    async fn generate_text(&self, video_id: &str, prompt: &str) -> Result<String> {
        Ok(format!("{} -> {}", video_id, prompt))
    }
}

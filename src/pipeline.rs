//! Pipeline coordinating vendor calls and report files.
//!
//! Each operation is a straight pass-through: look up the index, call the
//! vendor once per video, write the textual result to a report.

use crate::chat::{ChatCompletion, ChatOutcome, DisabledChat, KindoClient};
use crate::config::{ApiKeys, Settings};
use crate::error::{Result, VidbriefError};
use crate::reports::{format_chapter, format_gist, validate_index_name, ReportKind, ReportStore};
use crate::twelvelabs::{
    wait_for_done, Engine, GistType, Index, SummarizeKind, Task, TwelveLabsClient, Video,
    VideoUnderstanding,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Result of indexing a directory of videos.
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    pub index: Index,
    /// Vendor ids of the uploaded videos, in upload order.
    pub video_ids: Vec<String>,
}

/// The main pipeline.
pub struct Pipeline {
    settings: Settings,
    videos: Arc<dyn VideoUnderstanding>,
    chat: Arc<dyn ChatCompletion>,
    reports: ReportStore,
}

impl Pipeline {
    /// Create a pipeline talking to the real vendors.
    pub fn new(settings: Settings, keys: &ApiKeys) -> Result<Self> {
        let videos: Arc<dyn VideoUnderstanding> =
            Arc::new(TwelveLabsClient::from_settings(&settings, keys)?);
        let chat: Arc<dyn ChatCompletion> = match KindoClient::from_settings(&settings, keys) {
            Ok(client) => Arc::new(client),
            Err(VidbriefError::Config(reason)) => {
                warn!("Follow-up questions disabled: {}", reason);
                Arc::new(DisabledChat::new(reason))
            }
            Err(e) => return Err(e),
        };
        Ok(Self::with_components(settings, videos, chat))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        videos: Arc<dyn VideoUnderstanding>,
        chat: Arc<dyn ChatCompletion>,
    ) -> Self {
        let reports = ReportStore::new(settings.output_dir());
        Self {
            settings,
            videos,
            chat,
            reports,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reports(&self) -> &ReportStore {
        &self.reports
    }

    /// Local video files for an index, sorted by path.
    pub fn video_files(&self, index_name: &str) -> Result<Vec<PathBuf>> {
        validate_index_name(index_name)?;
        let dir = self.settings.videos_dir().join(index_name);
        let extension = self.settings.twelvelabs.video_extension.to_lowercase();

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Video directory {} does not exist", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.to_lowercase() == extension);
            if matches {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Create an index and upload every local video for it, waiting for each to be ready.
    pub async fn index_videos(&self, index_name: &str) -> Result<IndexOutcome> {
        self.index_videos_with_progress(index_name, |_, _| {}).await
    }

    /// Same as `index_videos`, reporting every observed task state as (file, task).
    #[instrument(skip(self, on_update))]
    pub async fn index_videos_with_progress<F>(
        &self,
        index_name: &str,
        mut on_update: F,
    ) -> Result<IndexOutcome>
    where
        F: FnMut(&PathBuf, &Task) + Send,
    {
        validate_index_name(index_name)?;
        let tl = &self.settings.twelvelabs;

        let engines = vec![Engine::new(&tl.engine, &tl.engine_options)];
        let index = self.videos.create_index(index_name, &engines).await?;
        info!(
            "Created index: id={} name={} engine={}",
            index.id, index.name, tl.engine
        );

        let poll_interval = Duration::from_secs(tl.poll_interval_seconds);
        let mut video_ids = Vec::new();

        for video_file in self.video_files(index_name)? {
            info!("Uploading {}", video_file.display());
            let task = self
                .videos
                .create_task(&index.id, &video_file, &tl.language)
                .await?;
            info!("Created task: id={}", task.id);

            let task = wait_for_done(self.videos.as_ref(), task, poll_interval, |t| {
                info!("  Status={}", t.status);
                on_update(&video_file, t);
            })
            .await?;

            if task.status != crate::twelvelabs::TaskStatus::Ready {
                return Err(VidbriefError::IndexingFailed {
                    status: task.status.to_string(),
                });
            }

            let video_id = task.video_id.ok_or_else(|| {
                VidbriefError::VendorResponse(format!(
                    "task {} is ready but has no video_id",
                    task.id
                ))
            })?;
            info!(
                "Uploaded {}. The unique identifier of your video is {}.",
                video_file.display(),
                video_id
            );
            video_ids.push(video_id);
        }

        Ok(IndexOutcome { index, video_ids })
    }

    /// Look up an index by name and list its videos.
    async fn lookup_index(&self, index_name: &str) -> Result<(Index, Vec<Video>)> {
        validate_index_name(index_name)?;
        let index = self
            .videos
            .find_index(index_name)
            .await?
            .ok_or_else(|| VidbriefError::IndexNotFound(index_name.to_string()))?;
        let videos = self.videos.list_videos(&index.id).await?;
        Ok((index, videos))
    }

    /// Summarize every video of an index into the summary report.
    #[instrument(skip(self))]
    pub async fn write_summary(&self, index_name: &str) -> Result<PathBuf> {
        let (_, videos) = self.lookup_index(index_name).await?;
        if videos.is_empty() {
            return Err(VidbriefError::NoVideos(index_name.to_string()));
        }

        let mut summaries = Vec::with_capacity(videos.len());
        for video in &videos {
            let res = self.videos.summarize(&video.id, SummarizeKind::Summary).await?;
            match res.summary {
                Some(summary) => summaries.push(summary),
                None => warn!("No summary returned for video {}", video.id),
            }
        }
        // Keep the previous report rather than replacing it with nothing.
        if summaries.is_empty() {
            return Err(VidbriefError::VendorResponse(format!(
                "no summaries returned for index {}",
                index_name
            )));
        }

        self.reports
            .write(index_name, ReportKind::Summary, &summaries.join("\n\n"))
    }

    /// Append the chapters of every video of an index to the chapter report.
    #[instrument(skip(self))]
    pub async fn write_chapters(&self, index_name: &str) -> Result<PathBuf> {
        let (_, videos) = self.lookup_index(index_name).await?;

        let mut lines = Vec::new();
        for video in &videos {
            let res = self.videos.summarize(&video.id, SummarizeKind::Chapter).await?;
            lines.extend(res.chapters.iter().map(format_chapter));
        }

        self.reports.append(index_name, ReportKind::Chapter, &lines)
    }

    /// Write title, topics and hashtags of every video of an index to the gist report.
    #[instrument(skip(self))]
    pub async fn write_gist(&self, index_name: &str) -> Result<PathBuf> {
        let (_, videos) = self.lookup_index(index_name).await?;

        let types = [GistType::Title, GistType::Topic, GistType::Hashtag];
        let mut blocks = Vec::with_capacity(videos.len());
        for video in &videos {
            let gist = self.videos.gist(&video.id, &types).await?;
            blocks.push(format_gist(&video.id, &gist));
        }

        self.reports
            .write(index_name, ReportKind::Gist, &blocks.join("\n\n"))
    }

    /// Run a free-form prompt against every video of an index into the prompt report.
    #[instrument(skip(self, prompt))]
    pub async fn run_query(&self, index_name: &str, prompt: &str) -> Result<PathBuf> {
        if prompt.trim().is_empty() {
            return Err(VidbriefError::InvalidInput("No prompt provided.".to_string()));
        }
        info!("Prompt {}", prompt);

        let (_, videos) = self.lookup_index(index_name).await?;
        if videos.is_empty() {
            return Err(VidbriefError::NoVideos(index_name.to_string()));
        }

        let mut answers = Vec::with_capacity(videos.len());
        for video in &videos {
            answers.push(self.videos.generate_text(&video.id, prompt).await?);
        }

        self.reports
            .write(index_name, ReportKind::Prompt, &answers.join("\n\n"))
    }

    /// Ask the chat provider a question about the stored summary of an index.
    #[instrument(skip(self, prompt))]
    pub async fn ask_followup(&self, index_name: &str, prompt: &str) -> Result<ChatOutcome> {
        validate_index_name(index_name)?;
        if prompt.trim().is_empty() {
            return Err(VidbriefError::InvalidInput("No prompt provided.".to_string()));
        }

        let summary = self
            .reports
            .read(index_name, ReportKind::Summary)?
            .ok_or_else(|| VidbriefError::SummaryMissing(index_name.to_string()))?;

        let prompts = &self.settings.prompts;
        let mut vars = HashMap::new();
        vars.insert("summary".to_string(), summary);
        vars.insert("prompt".to_string(), prompt.to_string());
        vars.insert("index_name".to_string(), index_name.to_string());

        let system = prompts.render_with_custom(&prompts.followup.system, &vars);
        let user = prompts.render_with_custom(&prompts.followup.user, &vars);

        self.chat.complete(&system, &user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::mock::MockChat;
    use crate::twelvelabs::mock::MockVideoService;
    use crate::twelvelabs::{Chapter, TaskStatus};

    fn settings_in(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.general.output_dir = dir.join("out").display().to_string();
        settings.general.videos_dir = dir.join("videos").display().to_string();
        settings.twelvelabs.poll_interval_seconds = 1;
        settings
    }

    fn pipeline(dir: &std::path::Path, videos: MockVideoService) -> (Pipeline, Arc<MockVideoService>) {
        let videos = Arc::new(videos);
        let pipeline = Pipeline::with_components(
            settings_in(dir),
            videos.clone(),
            Arc::new(MockChat::answering("unused")),
        );
        (pipeline, videos)
    }

    fn chapter(n: u32, title: &str) -> Chapter {
        Chapter {
            chapter_number: n,
            start: n as f64 * 10.0,
            end: n as f64 * 10.0 + 10.0,
            chapter_title: title.to_string(),
            chapter_summary: format!("About {}", title),
        }
    }

    #[tokio::test]
    async fn test_index_uploads_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let videos_dir = dir.path().join("videos").join("shopify");
        std::fs::create_dir_all(&videos_dir).unwrap();
        std::fs::write(videos_dir.join("b.mp4"), b"b").unwrap();
        std::fs::write(videos_dir.join("a.MP4"), b"a").unwrap();
        std::fs::write(videos_dir.join("notes.txt"), b"skip").unwrap();

        let (pipeline, videos) = pipeline(dir.path(), MockVideoService::new());
        let outcome = pipeline.index_videos("shopify").await.unwrap();

        assert_eq!(outcome.index.name, "shopify");
        assert_eq!(outcome.index.engines[0].engine_name, "pegasus1.1");
        assert_eq!(outcome.video_ids, vec!["video-task-1", "video-task-2"]);

        let uploads = videos.uploads();
        assert_eq!(uploads.len(), 2);
        assert!(uploads[0].1.ends_with("a.MP4"));
        assert!(uploads[1].1.ends_with("b.mp4"));
        assert_eq!(uploads[0].2, "en");
    }

    #[tokio::test]
    async fn test_index_without_local_videos_still_creates_index() {
        let dir = tempfile::tempdir().unwrap();
        let (pipeline, videos) = pipeline(dir.path(), MockVideoService::new());

        let outcome = pipeline.index_videos("empty").await.unwrap();
        assert!(outcome.video_ids.is_empty());
        assert_eq!(videos.index_names(), vec!["empty"]);
    }

    #[tokio::test]
    async fn test_index_fails_when_task_fails() {
        let dir = tempfile::tempdir().unwrap();
        let videos_dir = dir.path().join("videos").join("ios");
        std::fs::create_dir_all(&videos_dir).unwrap();
        std::fs::write(videos_dir.join("a.mp4"), b"a").unwrap();

        let service = MockVideoService::new().with_task_statuses(&[TaskStatus::Failed]);
        let (pipeline, _) = pipeline(dir.path(), service);

        let mut observed = Vec::new();
        let err = pipeline
            .index_videos_with_progress("ios", |_, t| observed.push(t.status.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, VidbriefError::IndexingFailed { ref status } if status == "failed"));
        assert_eq!(observed, vec![TaskStatus::Failed]);
    }

    #[tokio::test]
    async fn test_index_fails_when_ready_task_has_no_video() {
        let dir = tempfile::tempdir().unwrap();
        let videos_dir = dir.path().join("videos").join("ios");
        std::fs::create_dir_all(&videos_dir).unwrap();
        std::fs::write(videos_dir.join("a.mp4"), b"a").unwrap();

        let (pipeline, _) = pipeline(dir.path(), MockVideoService::new().without_video_ids());

        let err = pipeline.index_videos("ios").await.unwrap_err();
        assert!(
            matches!(err, VidbriefError::VendorResponse(ref msg) if msg.contains("task-1")),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_summary_writes_all_videos() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new()
            .with_index("shopify", &["v1", "v2"])
            .with_summary("v1", "First video.")
            .with_summary("v2", "Second video.");
        let (pipeline, _) = pipeline(dir.path(), service);

        let path = pipeline.write_summary("shopify").await.unwrap();
        assert!(path.ends_with("shopify_summary.out"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "First video.\n\nSecond video."
        );
    }

    #[tokio::test]
    async fn test_summary_keeps_previous_report_when_nothing_to_write() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new()
            .with_index("ios", &[])
            .with_index("android", &["v1"]);
        let (pipeline, _) = pipeline(dir.path(), service);
        for name in ["ios", "android"] {
            pipeline
                .reports()
                .write(name, ReportKind::Summary, "Earlier summary.")
                .unwrap();
        }

        let err = pipeline.write_summary("ios").await.unwrap_err();
        assert!(matches!(err, VidbriefError::NoVideos(ref n) if n == "ios"));

        // v1 has no summary scripted, so the vendor returns none.
        let err = pipeline.write_summary("android").await.unwrap_err();
        assert!(matches!(err, VidbriefError::VendorResponse(_)));

        for name in ["ios", "android"] {
            assert_eq!(
                pipeline.reports().read(name, ReportKind::Summary).unwrap(),
                Some("Earlier summary.".to_string())
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_index_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (pipeline, _) = pipeline(dir.path(), MockVideoService::new());

        let err = pipeline.write_summary("missing").await.unwrap_err();
        assert!(matches!(err, VidbriefError::IndexNotFound(ref n) if n == "missing"));
    }

    #[tokio::test]
    async fn test_chapters_append_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new()
            .with_index("ios", &["v1"])
            .with_chapters("v1", vec![chapter(1, "Intro"), chapter(2, "Setup")]);
        let (pipeline, _) = pipeline(dir.path(), service);

        pipeline.write_chapters("ios").await.unwrap();
        let path = pipeline.write_chapters("ios").await.unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "chapter_number=1 chapter_title=Intro chapter_summary=About Intro start=10 end=20"
        );
        assert_eq!(lines[2], lines[0]);
    }

    #[tokio::test]
    async fn test_gist_report() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new().with_index("ios", &["v1"]);
        let (pipeline, _) = pipeline(dir.path(), service);

        let path = pipeline.write_gist("ios").await.unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Title=Title of v1"));
        assert!(content.contains("Topics=onboarding, payments"));
        assert!(content.contains("Hashtags=#demo"));
    }

    #[tokio::test]
    async fn test_query_writes_prompt_report() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new().with_index("ios", &["v1"]);
        let (pipeline, _) = pipeline(dir.path(), service);

        let path = pipeline.run_query("ios", "five SEO keywords").await.unwrap();
        assert!(path.ends_with("ios_prompt.out"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "v1 -> five SEO keywords");

        let err = pipeline.run_query("ios", "  ").await.unwrap_err();
        assert!(matches!(err, VidbriefError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_query_on_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let service = MockVideoService::new().with_index("ios", &[]);
        let (pipeline, _) = pipeline(dir.path(), service);

        let err = pipeline.run_query("ios", "anything").await.unwrap_err();
        assert!(matches!(err, VidbriefError::NoVideos(_)));
    }

    #[tokio::test]
    async fn test_followup_uses_stored_summary() {
        let dir = tempfile::tempdir().unwrap();
        let chat = Arc::new(MockChat::answering("It covers checkout."));
        let pipeline = Pipeline::with_components(
            settings_in(dir.path()),
            Arc::new(MockVideoService::new()),
            chat.clone(),
        );

        let err = pipeline.ask_followup("shopify", "What?").await.unwrap_err();
        assert!(matches!(err, VidbriefError::SummaryMissing(_)));

        pipeline
            .reports()
            .write("shopify", ReportKind::Summary, "Checkout walkthrough.")
            .unwrap();
        let outcome = pipeline.ask_followup("shopify", "What is covered?").await.unwrap();
        assert_eq!(outcome, ChatOutcome::Answer("It covers checkout.".to_string()));

        let calls = chat.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("Checkout walkthrough."));
        assert_eq!(calls[0].1, "What is covered?");
    }

    #[tokio::test]
    async fn test_followup_user_prompt_sees_custom_variables() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(dir.path());
        settings
            .prompts
            .variables
            .insert("audience".to_string(), "support agents".to_string());
        settings.prompts.followup.user = "For {{audience}} on {{index_name}}: {{prompt}}".to_string();

        let chat = Arc::new(MockChat::answering("ok"));
        let pipeline =
            Pipeline::with_components(settings, Arc::new(MockVideoService::new()), chat.clone());
        pipeline
            .reports()
            .write("shopify", ReportKind::Summary, "Checkout walkthrough.")
            .unwrap();

        pipeline.ask_followup("shopify", "{{summary}}").await.unwrap();

        let calls = chat.calls();
        assert_eq!(calls[0].1, "For support agents on shopify: {{summary}}");
    }
}

//! HTTP client for the Twelve Labs REST API.

use super::{
    Engine, Gist, GistType, Index, Summarization, SummarizeKind, Task, Video, VideoUnderstanding,
};
use crate::config::{ApiKeys, Settings};
use crate::error::{Result, VidbriefError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout for JSON API requests (5 minutes). Uploads are not bounded.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Timeout for establishing a connection, uploads included.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Page size used when listing videos.
const VIDEO_PAGE_LIMIT: u32 = 50;

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
struct CreatedResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    data: String,
}

/// Twelve Labs API client.
pub struct TwelveLabsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TwelveLabsClient {
    /// Create a client for the given base URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from settings and the configured API key.
    pub fn from_settings(settings: &Settings, keys: &ApiKeys) -> Result<Self> {
        Self::new(&settings.twelvelabs.api_url, keys.require_twelvelabs()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .json(body)
    }

    /// Send a request and decode a JSON body, turning non-2xx answers into vendor errors.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.header("x-api-key", &self.api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VidbriefError::Vendor {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            VidbriefError::VendorResponse(format!("{} (body: {})", e, body))
        })
    }
}

/// Content type for an upload, guessed from the file extension.
fn video_mime(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

#[async_trait]
impl VideoUnderstanding for TwelveLabsClient {
    #[instrument(skip(self, engines))]
    async fn create_index(&self, name: &str, engines: &[Engine]) -> Result<Index> {
        let created: CreatedResponse = self
            .send(self.post_json(
                "indexes",
                &serde_json::json!({
                    "index_name": name,
                    "engines": engines,
                }),
            ))
            .await?;

        debug!("Created index {}", created.id);
        Ok(Index {
            id: created.id,
            name: name.to_string(),
            engines: engines.to_vec(),
        })
    }

    #[instrument(skip(self))]
    async fn find_index(&self, name: &str) -> Result<Option<Index>> {
        let list: ListResponse<Index> = self
            .send(self.get("indexes").query(&[("index_name", name)]))
            .await?;

        Ok(list.data.into_iter().find(|index| index.name == name))
    }

    #[instrument(skip(self))]
    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>> {
        let list: ListResponse<Video> = self
            .send(
                self.get(&format!("indexes/{}/videos", index_id))
                    .query(&[("page_limit", VIDEO_PAGE_LIMIT)]),
            )
            .await?;

        debug!("Index {} has {} videos", index_id, list.data.len());
        Ok(list.data)
    }

    #[instrument(skip(self), fields(video_path = %video_path.display()))]
    async fn create_task(&self, index_id: &str, video_path: &Path, language: &str) -> Result<Task> {
        let file = tokio::fs::File::open(video_path).await?;
        let length = file.metadata().await?.len();
        let file_name = video_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video")
            .to_string();
        debug!("Streaming {} bytes from {}", length, file_name);

        let part = Part::stream_with_length(reqwest::Body::from(file), length)
            .file_name(file_name)
            .mime_str(&video_mime(video_path))?;
        let form = Form::new()
            .text("index_id", index_id.to_string())
            .text("language", language.to_string())
            .part("video_file", part);

        // Uploads carry no overall timeout, only the connect timeout.
        let created: CreatedResponse = self
            .send(self.http.post(self.url("tasks")).multipart(form))
            .await?;

        Ok(Task {
            id: created.id,
            index_id: Some(index_id.to_string()),
            video_id: None,
            status: Default::default(),
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_task(&self, task_id: &str) -> Result<Task> {
        self.send(self.get(&format!("tasks/{}", task_id))).await
    }

    #[instrument(skip(self))]
    async fn summarize(&self, video_id: &str, kind: SummarizeKind) -> Result<Summarization> {
        self.send(self.post_json(
            "summarize",
            &serde_json::json!({
                "video_id": video_id,
                "type": kind,
            }),
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn gist(&self, video_id: &str, types: &[GistType]) -> Result<Gist> {
        self.send(self.post_json(
            "gist",
            &serde_json::json!({
                "video_id": video_id,
                "types": types,
            }),
        ))
        .await
    }

    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, video_id: &str, prompt: &str) -> Result<String> {
        let generated: GenerateResponse = self
            .send(self.post_json(
                "generate",
                &serde_json::json!({
                    "video_id": video_id,
                    "prompt": prompt,
                }),
            ))
            .await?;
        Ok(generated.data)
    }
}

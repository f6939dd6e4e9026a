//! Route handlers.

use super::{ApiError, AppState, Status};
use crate::chat::ChatOutcome;
use crate::reports::ReportKind;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

type HandlerResult = Result<Json<Status>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct PromptParams {
    prompt: Option<String>,
}

impl PromptParams {
    /// The prompt, if present and not blank.
    fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Keep malformed query strings in the `{"Error": ...}` shape.
fn prompt_params(
    params: Result<Query<PromptParams>, QueryRejection>,
) -> Result<PromptParams, ApiError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn missing_index_name() -> Json<Status> {
    Json(Status::Error("No index_name provided.".to_string()))
}

fn missing_prompt() -> Json<Status> {
    Json(Status::Error("No prompt provided.".to_string()))
}

fn written(index_name: &str, kind: ReportKind) -> Json<Status> {
    Json(Status::Success(format!(
        "Output written to {}",
        kind.file_name(index_name)
    )))
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello, world!" }))
}

pub async fn index(State(state): State<Arc<AppState>>, Path(index_name): Path<String>) -> HandlerResult {
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    state.pipeline.index_videos(&index_name).await?;
    Ok(Json(Status::Success(format!("{} indexed.", index_name))))
}

pub async fn summary(State(state): State<Arc<AppState>>, Path(index_name): Path<String>) -> HandlerResult {
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    state.pipeline.write_summary(&index_name).await?;
    Ok(written(&index_name, ReportKind::Summary))
}

pub async fn chapter(State(state): State<Arc<AppState>>, Path(index_name): Path<String>) -> HandlerResult {
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    state.pipeline.write_chapters(&index_name).await?;
    Ok(written(&index_name, ReportKind::Chapter))
}

pub async fn gist(State(state): State<Arc<AppState>>, Path(index_name): Path<String>) -> HandlerResult {
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    state.pipeline.write_gist(&index_name).await?;
    Ok(written(&index_name, ReportKind::Gist))
}

// Highlights are not generated yet; the route is kept so clients get a stable answer.
pub async fn highlight(Path(_index_name): Path<String>) -> Json<Status> {
    Json(Status::Error("/highlight endpoint not implemented.".to_string()))
}

pub async fn query(
    State(state): State<Arc<AppState>>,
    Path(index_name): Path<String>,
    params: Result<Query<PromptParams>, QueryRejection>,
) -> HandlerResult {
    let params = prompt_params(params)?;
    let Some(prompt) = params.prompt() else {
        return Ok(missing_prompt());
    };
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    state.pipeline.run_query(&index_name, prompt).await?;
    Ok(written(&index_name, ReportKind::Prompt))
}

pub async fn followup(
    State(state): State<Arc<AppState>>,
    Path(index_name): Path<String>,
    params: Result<Query<PromptParams>, QueryRejection>,
) -> HandlerResult {
    let params = prompt_params(params)?;
    let Some(prompt) = params.prompt() else {
        return Ok(missing_prompt());
    };
    if index_name.trim().is_empty() {
        return Ok(missing_index_name());
    }
    match state.pipeline.ask_followup(&index_name, prompt).await? {
        ChatOutcome::Answer(answer) => Ok(Json(Status::Success(answer))),
        ChatOutcome::Rejected { status, body } => Err(ApiError::Upstream { status, body }),
    }
}

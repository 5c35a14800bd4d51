//! Route handlers.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::{Html, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Error;
use crate::fs::{list_staging, StagingEntry};
use crate::server::error::ApiError;
use crate::server::multipart::read_upload;
use crate::server::page::render_index;
use crate::server::AppState;
use crate::staging::{today_utc, UploadSummary};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub summary: UploadSummary,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StagingListing {
    pub archive_root: String,
    pub items: Vec<StagingEntry>,
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.server.title, &today_utc()))
}

/// `POST /upload`
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let request = read_upload(multipart).await?;

    let orchestrator = Arc::clone(&state.orchestrator);
    let summary = tokio::task::spawn_blocking(move || orchestrator.handle(request))
        .await
        .map_err(Error::from)??;

    Ok(Json(UploadResponse {
        ok: true,
        message: summary.message(),
        summary,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "data_root": state.config.storage.data_root.display().to_string(),
        "site_root": state.config.storage.site_root.display().to_string(),
    }))
}

/// `GET /debug/staging`
pub async fn debug_staging(
    State(state): State<AppState>,
) -> Result<Json<StagingListing>, ApiError> {
    let archive_root = state.orchestrator.archive_root().to_path_buf();
    let root = archive_root.clone();
    let items = tokio::task::spawn_blocking(move || list_staging(&root))
        .await
        .map_err(Error::from)??;

    Ok(Json(StagingListing {
        archive_root: archive_root.display().to_string(),
        items,
    }))
}

//! Route handlers
//!
//! Thin wrappers over [`YtMate`]: validate the body, call the core,
//! map failures to [`ApiError`].

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};
use ytmate_core::{AnalysisResult, ConversionParams, ConversionResult, is_youtube_url};

use crate::AppState;
use crate::error::ApiError;

const AVAILABLE_ENDPOINTS: [&str; 4] = [
    "GET /",
    "GET /api/health",
    "POST /api/analyze",
    "POST /api/convert",
];

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl From<ConvertRequest> for ConversionParams {
    fn from(request: ConvertRequest) -> Self {
        Self {
            youtube_url: request.youtube_url.unwrap_or_default(),
            title: request.title.unwrap_or_default(),
            id: request.id.unwrap_or_default(),
            ext: request.ext.unwrap_or_default(),
            note: request.note.unwrap_or_default(),
            format: request.format.unwrap_or_default(),
        }
    }
}

fn body_or_bad_request<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// `POST /api/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request = body_or_bad_request(payload)?;
    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("YouTube URL is required"))?;

    if !is_youtube_url(&url) {
        warn!(%url, "analyzing a URL that does not look like YouTube");
    }
    info!(%url, "analyze request");

    match state.proxy.analyze(&url).await {
        Ok(result) => Ok(Json(result)),
        Err(err) if err.is_validation() => Err(ApiError::bad_request(err.to_string())),
        Err(err) => {
            error!(%url, error = %err, "analysis failed");
            Err(ApiError::internal(format!("Failed to analyze video: {err}")))
        }
    }
}

/// `POST /api/convert`
pub async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConversionResult>, ApiError> {
    let request = body_or_bad_request(payload)?;
    let params = ConversionParams::from(request);
    if params.id.trim().is_empty() {
        return Err(ApiError::bad_request("Conversion ID is required"));
    }

    info!(id = %params.id, title = %params.title, format = %params.format, "convert request");

    match state.proxy.convert(&params).await {
        Ok(result) => {
            if let Some(link) = result.download_url() {
                info!(id = %params.id, %link, "conversion produced a download URL");
            }
            Ok(Json(result))
        }
        Err(err) if err.is_validation() => Err(ApiError::bad_request(err.to_string())),
        Err(err) => {
            error!(id = %params.id, error = %err, "conversion failed");
            Err(ApiError::internal(format!("Failed to convert video: {err}")))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "YouTube Downloader API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "YouTube Downloader API",
        "endpoints": {
            "health": "GET /api/health",
            "analyze": "POST /api/analyze",
            "convert": "POST /api/convert"
        },
        "usage": {
            "analyze": {
                "method": "POST",
                "url": "/api/analyze",
                "body": { "url": "YouTube URL" }
            },
            "convert": {
                "method": "POST",
                "url": "/api/convert",
                "body": {
                    "youtubeUrl": "string",
                    "title": "string",
                    "id": "string",
                    "ext": "string",
                    "note": "string",
                    "format": "string"
                }
            }
        }
    }))
}

/// Any unmatched route
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}

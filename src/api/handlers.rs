use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::models::VideoRecord;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub interest_scores: Option<HashMap<String, i64>>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    #[serde(default = "default_max_search_keyword")]
    pub max_search_keyword: usize,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_search_keyword() -> usize {
    1
}

fn default_max_results() -> u32 {
    5
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub video_id: String,
}

/// Envelope every endpoint responds with
#[derive(Debug, Serialize)]
pub struct ApiResponse<M, D> {
    pub meta: M,
    pub data: D,
}

#[derive(Debug, Serialize)]
pub struct RecommendMeta {
    pub search_keyword: Vec<String>,
    pub running_time: f64,
}

#[derive(Debug, Serialize)]
pub struct SummaryMeta {
    pub video_id: String,
    pub running_time: f64,
}

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub description: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommendation pipeline: plan queries, discover candidate ids,
/// resolve and filter metadata
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<ApiResponse<RecommendMeta, Vec<VideoRecord>>>> {
    let interest_scores = request
        .interest_scores
        .ok_or_else(|| AppError::InvalidInput("interest_scores is required".to_string()))?;

    let started = Instant::now();

    let queries = state
        .planner
        .plan(&interest_scores, params.max_search_keyword)
        .await?;
    let ids = state.discovery.discover(&queries, params.max_results).await?;
    let videos = state.metadata.resolve(&ids).await?;

    Ok(Json(ApiResponse {
        meta: RecommendMeta {
            search_keyword: queries,
            running_time: started.elapsed().as_secs_f64(),
        },
        data: videos,
    }))
}

/// Per-video summary: transcript-first source text, summarized into the
/// record's description
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> AppResult<Json<ApiResponse<SummaryMeta, SummaryData>>> {
    let started = Instant::now();

    let mut videos = state.metadata.resolve(&[params.video_id.clone()]).await?;
    let video = videos
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("video {} not found", params.video_id)))?;

    let source = state.content.resolve(&video).await;
    let description = state.summarizer.summarize(source.as_deref()).await;

    Ok(Json(ApiResponse {
        meta: SummaryMeta {
            video_id: params.video_id,
            running_time: started.elapsed().as_secs_f64(),
        },
        data: SummaryData { description },
    }))
}

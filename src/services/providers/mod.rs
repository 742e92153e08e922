/// External data provider abstractions
///
/// This module provides a pluggable architecture for the three outbound
/// dependencies of the pipeline: completion generation, video
/// search/metadata, and transcript retrieval. Each is a trait so the
/// pipeline services hold injected handles and tests can substitute
/// fakes.
use crate::{
    error::AppResult,
    models::{CaptionSegment, TranscriptCatalog, TranscriptTrack, VideoItem},
};
use async_trait::async_trait;

pub mod openai;
pub mod transcript;
pub mod youtube;

pub use openai::OpenAiResponses;
pub use transcript::TimedTextProvider;
pub use youtube::YouTubeDataApi;

/// One message in a completion conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Strict JSON-schema output constraint for a completion
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
}

/// A single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    /// Ordered system/user messages
    pub messages: Vec<Message>,
    /// When set, the provider must return JSON matching this schema
    pub schema: Option<SchemaFormat>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Trait for LLM completion providers
///
/// One request, one text blob back (raw or schema-constrained JSON).
/// Malformed output is not retried here; callers decide whether a parse
/// failure is fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

/// Trait for video search/metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Search for video ids matching a query, bounded by `max_results`
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<String>>;

    /// Fetch raw metadata for a batch of ids in one round trip
    async fn list_videos(&self, ids: &[String]) -> AppResult<Vec<VideoItem>>;
}

/// Trait for transcript providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List the transcript tracks available for a video
    async fn list(&self, video_id: &str) -> AppResult<TranscriptCatalog>;

    /// Fetch the ordered caption segments of one track
    async fn fetch(&self, track: &TranscriptTrack) -> AppResult<Vec<CaptionSegment>>;
}

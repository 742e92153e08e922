use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::providers::{
    CompletionProvider, OpenAiResponses, TimedTextProvider, TranscriptProvider, VideoProvider,
    YouTubeDataApi,
};
use crate::services::{
    ContentResolver, MetadataResolver, QueryPlanner, SummaryGenerator, VideoDiscovery,
};

/// Shared application state
///
/// Provider handles are constructed once at startup and injected into
/// the pipeline services; nothing here is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<QueryPlanner>,
    pub discovery: Arc<VideoDiscovery>,
    pub metadata: Arc<MetadataResolver>,
    pub content: Arc<ContentResolver>,
    pub summarizer: Arc<SummaryGenerator>,
    /// Key expected in the `x-api-key` header
    pub api_key: Arc<str>,
}

impl AppState {
    /// Creates state backed by the real OpenAI / YouTube / timedtext
    /// providers
    pub fn new(config: &Config) -> AppResult<Self> {
        let completions: Arc<dyn CompletionProvider> = Arc::new(OpenAiResponses::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
        ));
        let videos: Arc<dyn VideoProvider> = Arc::new(YouTubeDataApi::new(
            config.youtube_api_key.clone(),
            config.youtube_api_url.clone(),
        ));
        let transcripts: Arc<dyn TranscriptProvider> =
            Arc::new(TimedTextProvider::new(config.proxy_credentials())?);

        Ok(Self::with_providers(
            completions,
            videos,
            transcripts,
            &config.api_key,
        ))
    }

    /// Creates state from explicit provider handles; tests substitute
    /// fakes here
    pub fn with_providers(
        completions: Arc<dyn CompletionProvider>,
        videos: Arc<dyn VideoProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        api_key: &str,
    ) -> Self {
        Self {
            planner: Arc::new(QueryPlanner::new(Arc::clone(&completions))),
            discovery: Arc::new(VideoDiscovery::new(Arc::clone(&videos))),
            metadata: Arc::new(MetadataResolver::new(videos)),
            content: Arc::new(ContentResolver::new(transcripts)),
            summarizer: Arc::new(SummaryGenerator::new(completions)),
            api_key: Arc::from(api_key),
        }
    }
}

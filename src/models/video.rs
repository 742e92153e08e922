use serde::{Deserialize, Serialize};

/// A recommended video returned to the client
///
/// Constructed by the metadata resolver; every field except
/// `description` is fixed at construction time. `description` is
/// filled with the generated summary by the summary flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    /// Zero-padded "HH:MM:SS"
    pub duration: String,
    /// Total length in seconds, parsed from the ISO-8601 period
    pub duration_seconds: u64,
    pub url: String,
    pub channel: String,
    /// "YYYY-MM-DD HH:MM:SS"
    pub published_at: String,
    pub thumbnail: String,
    pub description: Option<String>,
}

// ============================================================================
// YouTube Data API Types
// ============================================================================

/// Raw item from the YouTube `videos.list` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub content_details: ContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601 period, e.g. "PT1H2M3S"
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

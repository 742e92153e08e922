/// YouTube Data API v3 provider
///
/// Two endpoints: `search.list` resolves a query to video ids,
/// `videos.list` fetches snippet + contentDetails for a batch of ids in
/// a single request (ids joined, no pagination loop).
use crate::{
    error::{AppError, AppResult},
    models::VideoItem,
    services::providers::VideoProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Clone)]
pub struct YouTubeDataApi {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YouTubeDataApi {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl VideoProvider for YouTubeDataApi {
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<String>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "id"),
                ("q", query),
                ("maxResults", &max_results.to_string()),
                ("type", "video"),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube search returned status {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        let ids: Vec<String> = parsed
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        tracing::info!(
            query = %query,
            results = ids.len(),
            provider = "youtube_data_api",
            "Video search completed"
        );

        Ok(ids)
    }

    async fn list_videos(&self, ids: &[String]) -> AppResult<Vec<VideoItem>> {
        let url = format!("{}/videos", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", &ids.join(",")),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube videos.list returned status {}: {}",
                status, body
            )));
        }

        let parsed: VideoListResponse = response.json().await?;

        tracing::info!(
            requested = ids.len(),
            returned = parsed.items.len(),
            provider = "youtube_data_api",
            "Video metadata fetched"
        );

        Ok(parsed.items)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_skips_non_video_items() {
        let raw = serde_json::json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc123"}},
                {"id": {"kind": "youtube#channel", "channelId": "chan1"}},
                {"id": {"kind": "youtube#video", "videoId": "def456"}}
            ]
        });

        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        let ids: Vec<String> = parsed
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        assert_eq!(ids, vec!["abc123".to_string(), "def456".to_string()]);
    }

    #[test]
    fn test_video_list_response_parses_snippet_fields() {
        let raw = serde_json::json!({
            "items": [{
                "id": "abc123",
                "snippet": {
                    "title": "캠핑 브이로그",
                    "channelTitle": "camp channel",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "thumbnails": {"high": {"url": "https://img.test/abc123.jpg"}}
                },
                "contentDetails": {"duration": "PT10M3S"}
            }]
        });

        let parsed: VideoListResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.items.len(), 1);

        let item = &parsed.items[0];
        assert_eq!(item.id, "abc123");
        assert_eq!(item.snippet.title.as_deref(), Some("캠핑 브이로그"));
        assert_eq!(item.snippet.channel_title.as_deref(), Some("camp channel"));
        assert_eq!(
            item.content_details.duration.as_deref(),
            Some("PT10M3S")
        );
        assert_eq!(
            item.snippet.thumbnails.high.as_ref().unwrap().url,
            "https://img.test/abc123.jpg"
        );
    }
}

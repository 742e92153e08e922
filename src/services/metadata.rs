/// Batch metadata resolution
///
/// One `videos.list` round trip per call. Durations are normalized from
/// ISO-8601 periods; anything under the minimum length is a policy
/// exclusion, not an error. Provider failures surface as the coarse
/// quota error with the original cause attached.
use crate::{
    error::{AppError, AppResult},
    models::{VideoItem, VideoRecord},
    services::providers::VideoProvider,
};
use chrono::DateTime;
use std::sync::Arc;

/// Minimum video length; anything shorter is treated as a short and dropped
pub const MIN_VIDEO_SECONDS: u64 = 90;

const DEFAULT_TITLE: &str = "제목 없음";

pub struct MetadataResolver {
    videos: Arc<dyn VideoProvider>,
}

impl MetadataResolver {
    pub fn new(videos: Arc<dyn VideoProvider>) -> Self {
        Self { videos }
    }

    /// Fetches metadata for the given ids and normalizes each item,
    /// dropping videos under the minimum length
    pub async fn resolve(&self, ids: &[String]) -> AppResult<Vec<VideoRecord>> {
        if ids.is_empty() {
            return Err(AppError::InvalidInput("video_ids is required".to_string()));
        }

        let items = self
            .videos
            .list_videos(ids)
            .await
            .map_err(|e| AppError::QuotaExceeded(anyhow::Error::new(e)))?;

        let records: Vec<VideoRecord> = items.into_iter().filter_map(Self::normalize).collect();

        tracing::info!(requested = ids.len(), kept = records.len(), "Metadata resolved");

        Ok(records)
    }

    /// Builds a record from one raw item; `None` when it is too short
    fn normalize(item: VideoItem) -> Option<VideoRecord> {
        let raw_duration = item.content_details.duration.as_deref().unwrap_or("PT0M0S");
        let (duration, seconds) = format_duration(raw_duration);

        if seconds < MIN_VIDEO_SECONDS {
            return None;
        }

        let snippet = item.snippet;
        Some(VideoRecord {
            url: format!("https://www.youtube.com/watch?v={}", item.id),
            id: item.id,
            title: snippet.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            duration,
            duration_seconds: seconds,
            channel: snippet.channel_title.unwrap_or_default(),
            published_at: format_published_at(snippet.published_at.as_deref().unwrap_or("")),
            thumbnail: snippet
                .thumbnails
                .high
                .map(|thumbnail| thumbnail.url)
                .unwrap_or_default(),
            description: snippet.description,
        })
    }
}

/// Parses an ISO-8601 period ("PT#H#M#S") into a zero-padded
/// "HH:MM:SS" string and total seconds; non-matching input yields
/// ("00:00", 0)
pub fn format_duration(duration: &str) -> (String, u64) {
    let Some(rest) = duration.strip_prefix("PT") else {
        return ("00:00".to_string(), 0);
    };

    let mut hours = 0u64;
    let mut minutes = 0u64;
    let mut seconds = 0u64;
    let mut digits = String::new();

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let Ok(value) = digits.parse::<u64>() else {
            break;
        };
        digits.clear();
        match ch {
            'H' => hours = value,
            'M' => minutes = value,
            'S' => seconds = value,
            _ => break,
        }
    }

    (
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
        hours * 3600 + minutes * 60 + seconds,
    )
}

/// "2024-05-01T12:00:00Z" → "2024-05-01 12:00:00"
pub fn format_published_at(published_at: &str) -> String {
    match DateTime::parse_from_rfc3339(published_at) {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => published_at.replace('T', " ").replace('Z', ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentDetails, Thumbnail, Thumbnails, VideoSnippet};
    use crate::services::providers::MockVideoProvider;

    fn item(id: &str, duration: &str) -> VideoItem {
        VideoItem {
            id: id.to_string(),
            snippet: VideoSnippet {
                title: Some(format!("title {}", id)),
                description: Some("a description".to_string()),
                channel_title: Some("channel".to_string()),
                published_at: Some("2024-05-01T12:00:00Z".to_string()),
                thumbnails: Thumbnails {
                    high: Some(Thumbnail {
                        url: format!("https://img.test/{}.jpg", id),
                    }),
                },
            },
            content_details: ContentDetails {
                duration: Some(duration.to_string()),
            },
        }
    }

    #[test]
    fn test_format_duration_full_period() {
        assert_eq!(format_duration("PT1H2M3S"), ("01:02:03".to_string(), 3723));
        assert_eq!(format_duration("PT10M3S"), ("00:10:03".to_string(), 603));
        assert_eq!(format_duration("PT45S"), ("00:00:45".to_string(), 45));
        assert_eq!(format_duration("PT2H"), ("02:00:00".to_string(), 7200));
    }

    #[test]
    fn test_format_duration_non_matching_input() {
        assert_eq!(format_duration("1:30"), ("00:00".to_string(), 0));
        assert_eq!(format_duration(""), ("00:00".to_string(), 0));
        assert_eq!(format_duration("P1DT2H"), ("00:00".to_string(), 0));
    }

    #[test]
    fn test_format_published_at() {
        assert_eq!(
            format_published_at("2024-05-01T12:00:00Z"),
            "2024-05-01 12:00:00"
        );
        // Unparseable timestamps fall back to marker stripping
        assert_eq!(format_published_at("2024-05-01TxxZ"), "2024-05-01 xx");
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_ids() {
        let resolver = MetadataResolver::new(Arc::new(MockVideoProvider::new()));
        let result = resolver.resolve(&[]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_resolve_drops_videos_under_minimum_length() {
        let mut videos = MockVideoProvider::new();
        videos.expect_list_videos().returning(|_| {
            Ok(vec![
                item("short", "PT1M20S"),
                item("boundary", "PT1M30S"),
                item("long", "PT10M"),
            ])
        });

        let resolver = MetadataResolver::new(Arc::new(videos));
        let ids = vec!["short".to_string(), "boundary".to_string(), "long".to_string()];
        let records = resolver.resolve(&ids).await.unwrap();

        let kept: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(kept, vec!["boundary", "long"]);
        assert_eq!(records[0].duration_seconds, 90);
    }

    #[tokio::test]
    async fn test_resolve_applies_snippet_defaults() {
        let mut videos = MockVideoProvider::new();
        videos.expect_list_videos().returning(|_| {
            Ok(vec![VideoItem {
                id: "bare".to_string(),
                content_details: ContentDetails {
                    duration: Some("PT5M".to_string()),
                },
                ..Default::default()
            }])
        });

        let resolver = MetadataResolver::new(Arc::new(videos));
        let records = resolver.resolve(&["bare".to_string()]).await.unwrap();

        assert_eq!(records[0].title, "제목 없음");
        assert_eq!(records[0].channel, "");
        assert_eq!(records[0].thumbnail, "");
        assert_eq!(records[0].url, "https://www.youtube.com/watch?v=bare");
        assert!(records[0].description.is_none());
    }

    #[tokio::test]
    async fn test_resolve_wraps_provider_failure_as_quota_error() {
        let mut videos = MockVideoProvider::new();
        videos
            .expect_list_videos()
            .returning(|_| Err(AppError::ExternalApi("upstream 403".to_string())));

        let resolver = MetadataResolver::new(Arc::new(videos));
        let result = resolver.resolve(&["a".to_string()]).await;

        match result {
            Err(AppError::QuotaExceeded(source)) => {
                assert!(source.to_string().contains("upstream 403"));
            }
            other => panic!("expected quota error, got {:?}", other.map(|_| ())),
        }
    }
}

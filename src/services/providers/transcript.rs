/// YouTube transcript provider
///
/// Caption tracks are discovered from the player config embedded in the
/// watch page ("captionTracks" array), then fetched from the timedtext
/// endpoint in json3 format. All requests go through an authenticated
/// rotating proxy when credentials are configured, since caption
/// endpoints are aggressively rate limited per source address.
use crate::{
    error::{AppError, AppResult},
    models::{CaptionSegment, TranscriptCatalog, TranscriptKind, TranscriptTrack},
    services::providers::TranscriptProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PROXY_URL: &str = "http://p.webshare.io:80";
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

#[derive(Clone)]
pub struct TimedTextProvider {
    http_client: HttpClient,
}

impl TimedTextProvider {
    /// Creates a provider, routed through the rotating proxy when
    /// credentials are given
    pub fn new(proxy_credentials: Option<(String, String)>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();

        if let Some((username, password)) = proxy_credentials {
            let proxy = reqwest::Proxy::all(PROXY_URL)?.basic_auth(&username, &password);
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl TranscriptProvider for TimedTextProvider {
    async fn list(&self, video_id: &str) -> AppResult<TranscriptCatalog> {
        let response = self
            .http_client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Watch page returned status {}",
                response.status()
            )));
        }

        let page = response.text().await?;
        let tracks = extract_caption_tracks(&page)?;

        tracing::debug!(
            video_id = %video_id,
            tracks = tracks.len(),
            "Transcript catalog listed"
        );

        Ok(TranscriptCatalog { tracks })
    }

    async fn fetch(&self, track: &TranscriptTrack) -> AppResult<Vec<CaptionSegment>> {
        let response = self
            .http_client
            .get(&track.base_url)
            .query(&[("fmt", "json3")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Timedtext returned status {}",
                response.status()
            )));
        }

        let parsed: TimedTextResponse = response.json().await?;
        Ok(parsed
            .events
            .into_iter()
            .filter_map(|event| {
                let text: String = event.segs.into_iter().map(|seg| seg.utf8).collect();
                if text.is_empty() {
                    return None;
                }
                Some(CaptionSegment {
                    text,
                    start: event.t_start_ms.unwrap_or(0) as f64 / 1000.0,
                    duration: event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
                })
            })
            .collect())
    }
}

/// Pulls the "captionTracks" JSON array out of the watch-page HTML
fn extract_caption_tracks(page: &str) -> AppResult<Vec<TranscriptTrack>> {
    let start = page
        .find(CAPTION_TRACKS_MARKER)
        .map(|pos| pos + CAPTION_TRACKS_MARKER.len())
        .ok_or_else(|| AppError::ExternalApi("no caption tracks in watch page".to_string()))?;

    let array = read_json_array(&page[start..])
        .ok_or_else(|| AppError::ExternalApi("malformed caption track data".to_string()))?;

    let raw_tracks: Vec<RawCaptionTrack> = serde_json::from_str(array)
        .map_err(|e| AppError::ExternalApi(format!("caption track parse failed: {}", e)))?;

    Ok(raw_tracks
        .into_iter()
        .map(|raw| TranscriptTrack {
            language: raw.language_code,
            kind: if raw.kind.as_deref() == Some("asr") {
                TranscriptKind::Generated
            } else {
                TranscriptKind::ManuallyCreated
            },
            base_url: raw.base_url,
        })
        .collect())
}

/// Returns the balanced JSON array at the start of `input`, tracking
/// string literals so brackets inside text don't end the scan
fn read_json_array(input: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in input.char_indices() {
        if index == 0 && ch != '[' {
            return None;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&input[..index + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    /// "asr" marks an automatically generated track
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: Option<u64>,
    #[serde(default)]
    d_duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

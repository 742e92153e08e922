/// Source-text resolution for one video
///
/// Transcript-first, description-fallback. Every transcript step is
/// best-effort: any failure degrades silently to "no transcript" and
/// the record's provider-supplied description is used instead.
use crate::{
    models::VideoRecord,
    services::{providers::TranscriptProvider, TARGET_LANGUAGE},
};
use std::sync::Arc;

/// Caption window; skips introductory boilerplate and caps the text
/// handed to the summarizer
const CAPTION_WINDOW_START: usize = 20;
const CAPTION_WINDOW_END: usize = 220;

pub struct ContentResolver {
    transcripts: Arc<dyn TranscriptProvider>,
}

impl ContentResolver {
    pub fn new(transcripts: Arc<dyn TranscriptProvider>) -> Self {
        Self { transcripts }
    }

    /// Resolves the text to summarize: caption window when a usable
    /// transcript exists, otherwise the provider-supplied description
    pub async fn resolve(&self, video: &VideoRecord) -> Option<String> {
        match self.transcript_text(&video.id).await {
            Some(text) => Some(text),
            None => video.description.clone(),
        }
    }

    async fn transcript_text(&self, video_id: &str) -> Option<String> {
        let catalog = match self.transcripts.list(video_id).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "Transcript listing failed");
                return None;
            }
        };

        let track = catalog
            .find_manually_created(TARGET_LANGUAGE)
            .or_else(|| catalog.find_generated(TARGET_LANGUAGE))?;

        let segments = match self.transcripts.fetch(track).await {
            Ok(segments) => segments,
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "Transcript fetch failed");
                return None;
            }
        };

        let normalized: Vec<String> = segments
            .into_iter()
            .skip(CAPTION_WINDOW_START)
            .take(CAPTION_WINDOW_END - CAPTION_WINDOW_START)
            .map(|segment| segment.text.split_whitespace().collect::<String>())
            .collect();

        let joined = normalized.join(" ").trim().to_string();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

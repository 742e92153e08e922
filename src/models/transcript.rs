use serde::{Deserialize, Serialize};

/// One caption line with its position in the stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionSegment {
    pub text: String,
    /// Offset from the start of the video, seconds
    pub start: f64,
    /// Display duration, seconds
    pub duration: f64,
}

/// How a transcript track was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptKind {
    ManuallyCreated,
    Generated,
}

/// One available transcript track for a video
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    pub language: String,
    pub kind: TranscriptKind,
    /// Provider URL the segments can be fetched from
    pub base_url: String,
}

/// The set of transcript tracks available for one video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptCatalog {
    pub tracks: Vec<TranscriptTrack>,
}

impl TranscriptCatalog {
    /// Find a manually authored track in the given language
    pub fn find_manually_created(&self, language: &str) -> Option<&TranscriptTrack> {
        self.tracks
            .iter()
            .find(|t| t.kind == TranscriptKind::ManuallyCreated && t.language == language)
    }

    /// Find an automatically generated track in the given language
    pub fn find_generated(&self, language: &str) -> Option<&TranscriptTrack> {
        self.tracks
            .iter()
            .find(|t| t.kind == TranscriptKind::Generated && t.language == language)
    }
}

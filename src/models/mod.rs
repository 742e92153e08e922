mod transcript;
mod video;

pub use transcript::{CaptionSegment, TranscriptCatalog, TranscriptKind, TranscriptTrack};
pub use video::{ContentDetails, Thumbnail, Thumbnails, VideoItem, VideoRecord, VideoSnippet};

/// Short-summary generation
///
/// Always succeeds from the caller's perspective: thin input skips the
/// provider call and returns the no-content placeholder, and any
/// generation failure returns the error placeholder.
use crate::services::providers::{CompletionProvider, CompletionRequest, Message};
use std::sync::Arc;

const SUMMARY_MODEL: &str = "gpt-4o-mini";
const SUMMARY_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 300;

/// Inputs shorter than this are not worth a provider call
const MIN_SOURCE_CHARS: usize = 30;

pub const NO_CONTENT_PLACEHOLDER: &str = "설명과 자막이 모두 제공되지 않았습니다.";
pub const GENERATION_ERROR_PLACEHOLDER: &str = "자막 생성 에러";

const FORMAT_PROMPT: &str = "The text received is the text to be summarized. \
In your response, only pass the summarized text. \
No other format is needed, just return text. \
and Do not wrap.";

const LENGTH_PROMPT: &str = "No more than four sentences. \
If the text is not in Korean, translate it to Korean anyway.";

pub struct SummaryGenerator {
    completions: Arc<dyn CompletionProvider>,
}

impl SummaryGenerator {
    pub fn new(completions: Arc<dyn CompletionProvider>) -> Self {
        Self { completions }
    }

    /// Summarizes the given text; never returns an empty string
    pub async fn summarize(&self, text: Option<&str>) -> String {
        let text = match text {
            Some(text) if text.chars().count() >= MIN_SOURCE_CHARS => text,
            _ => return NO_CONTENT_PLACEHOLDER.to_string(),
        };

        let request = CompletionRequest {
            model: SUMMARY_MODEL.to_string(),
            messages: vec![
                Message::system(FORMAT_PROMPT),
                Message::system(LENGTH_PROMPT),
                Message::user(text),
            ],
            schema: None,
            temperature: SUMMARY_TEMPERATURE,
            max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
        };

        match self.completions.complete(request).await {
            Ok(summary) => {
                let summary = summary.trim();
                if summary.is_empty() {
                    GENERATION_ERROR_PLACEHOLDER.to_string()
                } else {
                    summary.to_string()
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Summary generation failed");
                GENERATION_ERROR_PLACEHOLDER.to_string()
            }
        }
    }
}

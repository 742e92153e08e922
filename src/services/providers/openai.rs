/// OpenAI Responses API provider
///
/// Issues one `POST /responses` call per completion. Schema-constrained
/// requests carry a strict `json_schema` text format; the response text
/// is taken from the first output message. Token usage is logged at
/// debug level.
use crate::{
    error::{AppError, AppResult},
    services::providers::{CompletionProvider, CompletionRequest},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone)]
pub struct OpenAiResponses {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OpenAiResponses {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    fn build_body(request: &CompletionRequest) -> serde_json::Value {
        let input: Vec<ApiMessage<'_>> = request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: &m.role,
                content: &m.content,
            })
            .collect();

        let mut body = json!({
            "model": request.model,
            "input": input,
            "temperature": request.temperature,
            "max_output_tokens": request.max_output_tokens,
        });

        if let Some(format) = &request.schema {
            body["text"] = json!({
                "format": {
                    "type": "json_schema",
                    "name": format.name,
                    "strict": true,
                    "schema": format.schema,
                }
            });
        }

        body
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiResponses {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let url = format!("{}/responses", self.api_url);
        let body = Self::build_body(&request);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI returned status {}: {}",
                status, body
            )));
        }

        let parsed: ApiResponse = response.json().await?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                model = %request.model,
                total_tokens = usage.total_tokens,
                "Completion finished"
            );
        }

        parsed
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .map(|content| content.text)
            .find(|text| !text.is_empty())
            .ok_or_else(|| AppError::Completion("empty completion output".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

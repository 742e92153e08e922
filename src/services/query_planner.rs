/// Search-query planning
///
/// Turns a weighted interest-keyword map into a small ordered set of
/// natural-language search phrases via one schema-constrained
/// completion. Malformed completion output is not retried; a parse
/// failure is fatal to the request.
use crate::{
    error::{AppError, AppResult},
    services::providers::{CompletionProvider, CompletionRequest, Message, SchemaFormat},
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

const PLANNER_MODEL: &str = "gpt-4o";
const PLANNER_TEMPERATURE: f32 = 1.2;
const PLANNER_MAX_OUTPUT_TOKENS: u32 = 100;

const PLANNER_PROMPT: &str = "You will receive a JSON object of user interest keywords and their scores. \
Produce search terms that reflect the high interest of your users. \
Create search terms by grouping similar keywords together. \
Don't make your search terms into sentences. \
Do not output more than 5 items. Return only a list of search queries.";

pub struct QueryPlanner {
    completions: Arc<dyn CompletionProvider>,
}

#[derive(Debug, Deserialize)]
struct PlannedKeywords {
    keywords: Vec<String>,
}

impl QueryPlanner {
    pub fn new(completions: Arc<dyn CompletionProvider>) -> Self {
        Self { completions }
    }

    /// Generates at most `max_queries` Korean search phrases
    pub async fn plan(
        &self,
        interest_scores: &HashMap<String, i64>,
        max_queries: usize,
    ) -> AppResult<Vec<String>> {
        if interest_scores.is_empty() {
            return Err(AppError::InvalidInput(
                "interest_scores is required".to_string(),
            ));
        }

        let payload = serde_json::to_string(interest_scores)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let request = CompletionRequest {
            model: PLANNER_MODEL.to_string(),
            messages: vec![Message::system(PLANNER_PROMPT), Message::user(payload)],
            schema: Some(SchemaFormat {
                name: "user_interest_algorithm".to_string(),
                schema: json!({
                    "type": "object",
                    "properties": {
                        "keywords": {
                            "type": "array",
                            "description": "Korean 5-word sentences of search keywords.",
                            "items": {"type": "string"},
                        },
                    },
                    "required": ["keywords"],
                    "additionalProperties": false,
                }),
            }),
            temperature: PLANNER_TEMPERATURE,
            max_output_tokens: PLANNER_MAX_OUTPUT_TOKENS,
        };

        let raw = self.completions.complete(request).await?;
        let parsed: PlannedKeywords = serde_json::from_str(&raw)
            .map_err(|e| AppError::Completion(format!("malformed keyword completion: {}", e)))?;

        let mut queries = parsed.keywords;
        queries.truncate(max_queries);

        tracing::info!(queries = queries.len(), "Search queries planned");

        Ok(queries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCompletionProvider;

    fn scores() -> HashMap<String, i64> {
        HashMap::from([("캠핑".to_string(), 90), ("카페".to_string(), 40)])
    }

    #[tokio::test]
    async fn test_plan_rejects_empty_map() {
        let planner = QueryPlanner::new(Arc::new(MockCompletionProvider::new()));

        let result = planner.plan(&HashMap::new(), 5).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_plan_truncates_to_requested_count() {
        let mut completions = MockCompletionProvider::new();
        completions.expect_complete().returning(|_| {
            Ok(r#"{"keywords":["캠핑 브이로그","감성 카페 투어","차박 용품"]}"#.to_string())
        });

        let planner = QueryPlanner::new(Arc::new(completions));
        let queries = planner.plan(&scores(), 1).await.unwrap();

        assert_eq!(queries, vec!["캠핑 브이로그".to_string()]);
    }

    #[tokio::test]
    async fn test_plan_sends_schema_constrained_request() {
        let mut completions = MockCompletionProvider::new();
        completions
            .expect_complete()
            .withf(|request| {
                request.model == PLANNER_MODEL
                    && request.schema.is_some()
                    && request.messages.len() == 2
                    && request.messages[0].role == "system"
            })
            .returning(|_| Ok(r#"{"keywords":["캠핑 장비 추천"]}"#.to_string()));

        let planner = QueryPlanner::new(Arc::new(completions));
        let queries = planner.plan(&scores(), 5).await.unwrap();

        assert_eq!(queries.len(), 1);
    }

    #[tokio::test]
    async fn test_plan_fails_on_malformed_completion() {
        let mut completions = MockCompletionProvider::new();
        completions
            .expect_complete()
            .returning(|_| Ok("not json at all".to_string()));

        let planner = QueryPlanner::new(Arc::new(completions));
        let result = planner.plan(&scores(), 5).await;

        assert!(matches!(result, Err(AppError::Completion(_))));
    }
}

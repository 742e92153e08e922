/// Multi-query video discovery
///
/// One bounded search per query, issued as parallel tasks and joined
/// once all complete. A failing sub-search degrades to an empty partial
/// result for that query; only when every sub-search failed does the
/// whole call fail. Results are deduplicated with set semantics, so
/// insertion order is not preserved.
use crate::{
    error::{AppError, AppResult},
    services::providers::VideoProvider,
};
use std::collections::HashSet;
use std::sync::Arc;

pub struct VideoDiscovery {
    videos: Arc<dyn VideoProvider>,
}

impl VideoDiscovery {
    pub fn new(videos: Arc<dyn VideoProvider>) -> Self {
        Self { videos }
    }

    /// Resolves each query to candidate video ids and deduplicates
    /// across queries
    pub async fn discover(
        &self,
        queries: &[String],
        max_results_per_query: u32,
    ) -> AppResult<Vec<String>> {
        let mut tasks = Vec::new();

        for query in queries {
            let videos = Arc::clone(&self.videos);
            let query = query.clone();
            tasks.push(tokio::spawn(async move {
                videos.search(&query, max_results_per_query).await
            }));
        }

        let mut ids = Vec::new();
        let mut errors = Vec::new();

        for task in tasks {
            match task.await {
                Ok(Ok(batch)) => ids.extend(batch),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Search failed for query");
                    errors.push(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    errors.push(AppError::Internal(e.to_string()));
                }
            }
        }

        if ids.is_empty() && !errors.is_empty() {
            return Err(AppError::QuotaExceeded(anyhow::Error::new(
                errors.swap_remove(0),
            )));
        }

        let unique: HashSet<String> = ids.into_iter().collect();
        Ok(unique.into_iter().collect())
    }
}

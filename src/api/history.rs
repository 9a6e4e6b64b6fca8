use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, ApiResult};

#[derive(Debug, Default, Clone, Serialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// AI generation history: past chat outputs the user kept, with ratings and
/// promotion into the case library.
pub struct GenerationHistoryApi<'a> {
    client: &'a ApiClient,
}

impl GenerationHistoryApi<'_> {
    pub async fn list(&self, query: &HistoryQuery) -> ApiResult<Value> {
        self.client.get_query("/aigc/enhanced/history", query).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/aigc/enhanced/history", data).await
    }

    pub async fn rate(&self, history_id: i64, rating: f64) -> ApiResult<Value> {
        self.client
            .post_query(
                &format!("/aigc/enhanced/history/{history_id}/rate"),
                &[("rating", rating)],
            )
            .await
    }

    pub async fn save_as_case(&self, history_id: i64) -> ApiResult<Value> {
        self.client
            .post(
                &format!("/aigc/enhanced/history/{history_id}/save-as-case"),
                &Value::Null,
            )
            .await
    }
}

impl ApiClient {
    pub fn generation_history(&self) -> GenerationHistoryApi<'_> {
        GenerationHistoryApi { client: self }
    }
}

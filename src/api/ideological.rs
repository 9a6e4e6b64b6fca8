use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, ApiResult};

/// Shared paged-list query for the ideological resource groups.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Case library.
pub struct CasesApi<'a> {
    client: &'a ApiClient,
}

impl CasesApi<'_> {
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client.get_query("/ideological/cases/", query).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/cases/", data).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/ideological/cases/{id}")).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/ideological/cases/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/ideological/cases/{id}")).await
    }

    pub async fn batch(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/cases/batch", data).await
    }

    pub async fn hot(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client.get_query("/ideological/cases/hot/list", query).await
    }

    pub async fn recommended(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client
            .get_query("/ideological/cases/recommended/list", query)
            .await
    }

    pub async fn rate(&self, id: i64, rating: f64) -> ApiResult<Value> {
        self.client
            .post_query(&format!("/ideological/cases/{id}/rate"), &[("rating", rating)])
            .await
    }

    pub async fn chapters(&self) -> ApiResult<Value> {
        self.client.get("/ideological/cases/chapters/list").await
    }

    pub async fn themes(&self) -> ApiResult<Value> {
        self.client.get("/ideological/cases/themes/list").await
    }
}

/// Prompt templates.
pub struct TemplatesApi<'a> {
    client: &'a ApiClient,
}

impl TemplatesApi<'_> {
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client.get_query("/ideological/templates/", query).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/templates/", data).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/ideological/templates/{id}")).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/ideological/templates/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/ideological/templates/{id}")).await
    }

    pub async fn batch(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/templates/batch", data).await
    }

    pub async fn system(&self) -> ApiResult<Value> {
        self.client.get("/ideological/templates/system/list").await
    }

    pub async fn rate(&self, id: i64, rating: f64) -> ApiResult<Value> {
        self.client
            .post_query(
                &format!("/ideological/templates/{id}/rate"),
                &[("rating", rating)],
            )
            .await
    }

    /// Render a template with the given variable bindings.
    pub async fn render(&self, id: i64, variables: &impl Serialize) -> ApiResult<Value> {
        self.client
            .post(&format!("/ideological/templates/{id}/render"), variables)
            .await
    }

    pub async fn types(&self) -> ApiResult<Value> {
        self.client.get("/ideological/templates/types/list").await
    }

    pub async fn categories(&self) -> ApiResult<Value> {
        self.client.get("/ideological/templates/categories/list").await
    }

    pub async fn themes(&self) -> ApiResult<Value> {
        self.client.get("/ideological/templates/themes/list").await
    }
}

/// Teaching resources. Multipart upload and blob download stay with the
/// host application.
pub struct ResourcesApi<'a> {
    client: &'a ApiClient,
}

impl ResourcesApi<'_> {
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client.get_query("/ideological/resources/", query).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/ideological/resources/{id}")).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/ideological/resources/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/ideological/resources/{id}")).await
    }

    pub async fn batch(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/resources/batch", data).await
    }

    pub async fn hot(&self, query: &ListQuery) -> ApiResult<Value> {
        self.client
            .get_query("/ideological/resources/hot/list", query)
            .await
    }

    pub async fn types(&self) -> ApiResult<Value> {
        self.client.get("/ideological/resources/types/list").await
    }

    pub async fn themes(&self) -> ApiResult<Value> {
        self.client.get("/ideological/resources/themes/list").await
    }
}

/// Theme category tree.
pub struct ThemeCategoriesApi<'a> {
    client: &'a ApiClient,
}

impl ThemeCategoriesApi<'_> {
    pub async fn tree(&self) -> ApiResult<Value> {
        self.client.get("/ideological/theme-categories/tree").await
    }

    pub async fn list(&self) -> ApiResult<Value> {
        self.client.get("/ideological/theme-categories/list").await
    }

    pub async fn names(&self) -> ApiResult<Value> {
        self.client.get("/ideological/theme-categories/names").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .get(&format!("/ideological/theme-categories/{id}"))
            .await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/ideological/theme-categories", data).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client
            .put(&format!("/ideological/theme-categories/{id}"), data)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client
            .delete(&format!("/ideological/theme-categories/{id}"))
            .await
    }

    pub async fn move_to(&self, id: i64, target: &impl Serialize) -> ApiResult<Value> {
        self.client
            .post_query(&format!("/ideological/theme-categories/{id}/move"), target)
            .await
    }
}

impl ApiClient {
    pub fn cases(&self) -> CasesApi<'_> {
        CasesApi { client: self }
    }

    pub fn templates(&self) -> TemplatesApi<'_> {
        TemplatesApi { client: self }
    }

    pub fn resources(&self) -> ResourcesApi<'_> {
        ResourcesApi { client: self }
    }

    pub fn theme_categories(&self) -> ThemeCategoriesApi<'_> {
        ThemeCategoriesApi { client: self }
    }
}

use serde::Serialize;
use serde_json::{Value, json};

use crate::client::{ApiClient, ApiResult};

/// Query parameters for the paged course list.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CourseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// New position for one chapter in a reorder request.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterOrder {
    pub id: i64,
    pub order_num: i32,
}

/// New position for one knowledge point in a reorder request.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgePointOrder {
    pub id: i64,
    pub order: i32,
}

/// Target of a category move (drag and drop).
#[derive(Debug, Clone, Serialize)]
pub struct MoveCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub order_num: i32,
}

pub struct CoursesApi<'a> {
    client: &'a ApiClient,
}

impl CoursesApi<'_> {
    pub async fn list(&self, query: &CourseQuery) -> ApiResult<Value> {
        self.client.get_query("/courses/", query).await
    }

    pub async fn list_all(&self, is_active: bool) -> ApiResult<Value> {
        self.client
            .get_query("/courses/all", &[("is_active", is_active)])
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/courses/{id}")).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/courses/", data).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/courses/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/courses/{id}")).await
    }
}

pub struct ChaptersApi<'a> {
    client: &'a ApiClient,
}

impl ChaptersApi<'_> {
    pub async fn list_by_course(&self, course_id: i64) -> ApiResult<Value> {
        self.client
            .get_query("/chapters/", &[("course_id", course_id)])
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/chapters/{id}")).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/chapters/", data).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/chapters/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/chapters/{id}")).await
    }

    pub async fn reorder(&self, chapters: &[ChapterOrder]) -> ApiResult<Value> {
        self.client
            .post("/chapters/reorder", &json!({ "chapters": chapters }))
            .await
    }
}

pub struct KnowledgePointsApi<'a> {
    client: &'a ApiClient,
}

impl KnowledgePointsApi<'_> {
    pub async fn list_by_chapter(&self, chapter_id: i64) -> ApiResult<Value> {
        self.client
            .get_query("/knowledge-points/", &[("chapter_id", chapter_id)])
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/knowledge-points/{id}")).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/knowledge-points/", data).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/knowledge-points/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/knowledge-points/{id}")).await
    }

    pub async fn reorder(&self, knowledge_points: &[KnowledgePointOrder]) -> ApiResult<Value> {
        self.client
            .post(
                "/knowledge-points/reorder",
                &json!({ "knowledge_points": knowledge_points }),
            )
            .await
    }
}

pub struct CaseCategoriesApi<'a> {
    client: &'a ApiClient,
}

impl CaseCategoriesApi<'_> {
    pub async fn tree(&self) -> ApiResult<Value> {
        self.client.get("/case-categories/tree").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client.get(&format!("/case-categories/{id}")).await
    }

    pub async fn create(&self, data: &impl Serialize) -> ApiResult<Value> {
        self.client.post("/case-categories/", data).await
    }

    pub async fn update(&self, id: i64, data: &impl Serialize) -> ApiResult<Value> {
        self.client.put(&format!("/case-categories/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.delete(&format!("/case-categories/{id}")).await
    }

    pub async fn move_to(&self, id: i64, target: &MoveCategory) -> ApiResult<Value> {
        self.client
            .post(&format!("/case-categories/{id}/move"), target)
            .await
    }
}

impl ApiClient {
    pub fn courses(&self) -> CoursesApi<'_> {
        CoursesApi { client: self }
    }

    pub fn chapters(&self) -> ChaptersApi<'_> {
        ChaptersApi { client: self }
    }

    pub fn knowledge_points(&self) -> KnowledgePointsApi<'_> {
        KnowledgePointsApi { client: self }
    }

    pub fn case_categories(&self) -> CaseCategoriesApi<'_> {
        CaseCategoriesApi { client: self }
    }
}

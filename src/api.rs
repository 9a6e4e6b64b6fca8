//! Thin wrappers over [`crate::ApiClient`], grouped the way the backend
//! groups its routes. Create/update payloads are caller-supplied JSON-like
//! values; list queries are small typed structs.

mod courses;
mod history;
mod ideological;

pub use courses::{
    CaseCategoriesApi, ChapterOrder, ChaptersApi, CourseQuery, CoursesApi, KnowledgePointOrder,
    KnowledgePointsApi, MoveCategory,
};
pub use history::{GenerationHistoryApi, HistoryQuery};
pub use ideological::{CasesApi, ListQuery, ResourcesApi, TemplatesApi, ThemeCategoriesApi};

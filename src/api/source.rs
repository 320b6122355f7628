use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{Page, Task, TaskQuery};

/// The fetches the view-models depend on.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, TaskdeskError>;

    async fn fetch_all_tasks(&self) -> Result<Vec<Task>, TaskdeskError>;

    async fn fetch_tasks_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Task>, TaskdeskError>;
}

#[async_trait]
impl TaskSource for ApiClient {
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, TaskdeskError> {
        self.list_tasks(query).await
    }

    async fn fetch_all_tasks(&self) -> Result<Vec<Task>, TaskdeskError> {
        self.all_tasks().await
    }

    async fn fetch_tasks_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Task>, TaskdeskError> {
        self.tasks_between(start, end).await
    }
}

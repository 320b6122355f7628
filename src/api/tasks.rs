use chrono::NaiveDateTime;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::due_date::WIRE_FORMAT;
use crate::models::{Page, SortDirection, SortField, Task, TaskDraft, TaskQuery, TaskStatus};

impl ApiClient {
    /// `GET /tasks` with paging, sort, and server-side filters.
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, TaskdeskError> {
        let mut params = query.to_params();
        params.extend(self.username_param());
        self.fetch(self.request(Method::GET, "tasks")?.query(&params))
            .await
    }

    pub async fn all_tasks(&self) -> Result<Vec<Task>, TaskdeskError> {
        let params: Vec<_> = self.username_param().into_iter().collect();
        self.fetch(self.request(Method::GET, "tasks/all")?.query(&params))
            .await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, TaskdeskError> {
        self.fetch(self.request(Method::GET, &format!("tasks/{id}"))?)
            .await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, TaskdeskError> {
        draft.validate()?;
        self.fetch(self.request(Method::POST, "tasks")?.json(draft))
            .await
    }

    pub async fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, TaskdeskError> {
        draft.validate()?;
        self.fetch(self.request(Method::PUT, &format!("tasks/{id}"))?.json(draft))
            .await
    }

    pub async fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<Task, TaskdeskError> {
        let builder = self
            .request(Method::PUT, &format!("tasks/{id}/status"))?
            .query(&[("status", status.as_str())]);
        self.fetch(builder).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::DELETE, &format!("tasks/{id}"))?)
            .await
    }

    pub async fn archive_task(&self, id: i64) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::PUT, &format!("tasks/{id}/archive"))?)
            .await
    }

    pub async fn unarchive_task(&self, id: i64) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::PUT, &format!("tasks/{id}/unarchive"))?)
            .await
    }

    pub async fn archived_tasks(&self) -> Result<Vec<Task>, TaskdeskError> {
        self.fetch(self.request(Method::GET, "tasks/archived")?)
            .await
    }

    /// Server-side keyword search, paged.
    pub async fn search_tasks(&self, keyword: &str, page: u32, size: u32) -> Result<Page<Task>, TaskdeskError> {
        let builder = self.request(Method::GET, "tasks/search")?.query(&[
            ("keyword", keyword.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ]);
        self.fetch(builder).await
    }

    /// `GET /tasks/calendar` for an inclusive date-time range.
    pub async fn tasks_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Task>, TaskdeskError> {
        let mut params = vec![
            ("start", start.format(WIRE_FORMAT).to_string()),
            ("end", end.format(WIRE_FORMAT).to_string()),
        ];
        params.extend(self.username_param());
        self.fetch(self.request(Method::GET, "tasks/calendar")?.query(&params))
            .await
    }

    pub async fn overdue_tasks(&self) -> Result<Vec<Task>, TaskdeskError> {
        self.fetch(self.request(Method::GET, "tasks/overdue")?)
            .await
    }

    /// Every user's tasks, paged. Admin only.
    pub async fn admin_tasks(
        &self,
        page: u32,
        size: u32,
        sort_by: SortField,
        sort_dir: SortDirection,
    ) -> Result<Page<Task>, TaskdeskError> {
        let builder = self.request(Method::GET, "tasks/admin/all")?.query(&[
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("sortBy", sort_by.as_str().to_string()),
            ("sortDir", sort_dir.as_str().to_string()),
        ]);
        self.fetch(builder).await
    }

    /// Every user's tasks, unpaged. Admin only.
    pub async fn admin_tasks_simple(&self) -> Result<Vec<Task>, TaskdeskError> {
        self.fetch(self.request(Method::GET, "tasks/admin/all-simple")?)
            .await
    }
}

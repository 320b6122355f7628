use reqwest::Method;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{NewReminder, Reminder};

impl ApiClient {
    pub async fn create_reminder(&self, reminder: &NewReminder) -> Result<Reminder, TaskdeskError> {
        if reminder.reminder_time.is_none() {
            return Err(TaskdeskError::validation("Reminder time is required"));
        }
        self.fetch(self.request(Method::POST, "reminders")?.json(reminder))
            .await
    }

    pub async fn reminders_for_task(&self, task_id: i64) -> Result<Vec<Reminder>, TaskdeskError> {
        self.fetch(self.request(Method::GET, &format!("reminders/task/{task_id}"))?)
            .await
    }

    pub async fn pending_reminders(&self) -> Result<Vec<Reminder>, TaskdeskError> {
        self.fetch(self.request(Method::GET, "reminders/pending")?)
            .await
    }

    pub async fn delete_reminder(&self, id: i64) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::DELETE, &format!("reminders/{id}"))?)
            .await
    }
}

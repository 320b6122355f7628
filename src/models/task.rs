use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TaskdeskError;
use crate::models::due_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Case-insensitive; accepts `in-progress` as well as `in_progress`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

/// A task as returned by the backend. Transient copy; the backend owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, with = "due_date")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// Case-insensitive substring match against title, and description when present.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// Create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(with = "due_date")]
    pub due_date: Option<NaiveDateTime>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
        }
    }

    /// Start an edit from the current server copy.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
        }
    }

    pub fn validate(&self) -> Result<(), TaskdeskError> {
        if self.title.trim().is_empty() {
            return Err(TaskdeskError::validation("Task title must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn task(title: &str, description: Option<&str>) -> Task {
        Task {
            id: 1,
            title: title.into(),
            description: description.map(Into::into),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_date: None,
            created_at: None,
            archived: false,
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(TaskStatus::from_str("completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_str("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("IN_PROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("all"), None);
        assert_eq!(Priority::from_str("high"), Some(Priority::High));
        assert_eq!(Priority::from_str("urgent"), None);
    }

    #[test]
    fn test_decode_both_due_date_shapes() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            {"id": 1, "title": "a", "status": "PENDING", "priority": "LOW",
             "dueDate": "2024-03-15T10:00:00"},
            {"id": 2, "title": "b", "status": "COMPLETED", "priority": "HIGH",
             "dueDate": [2024, 3, 15, 10, 0, 0], "createdAt": [2024, 3, 1, 8, 30]},
            {"id": 3, "title": "c", "status": "IN_PROGRESS", "priority": "MEDIUM",
             "dueDate": null},
            {"id": 4, "title": "d", "status": "PENDING", "priority": "MEDIUM",
             "dueDate": "garbage"}
        ]))
        .unwrap();
        assert_eq!(tasks[0].due_date, tasks[1].due_date);
        assert!(tasks[1].created_at.is_some());
        assert_eq!(tasks[2].due_date, None);
        assert_eq!(tasks[3].due_date, None);
    }

    #[test]
    fn test_matches_search() {
        let t = task("Write Report", Some("Quarterly FINANCE summary"));
        assert!(t.matches_search("report"));
        assert!(t.matches_search("finance"));
        assert!(!t.matches_search("budget"));
        assert!(!task("Groceries", None).matches_search("milk"));
    }

    #[test]
    fn test_is_overdue() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut t = task("x", None);
        assert!(!t.is_overdue(now));
        t.due_date = Some(now - chrono::Duration::hours(1));
        assert!(t.is_overdue(now));
        t.status = TaskStatus::Completed;
        assert!(!t.is_overdue(now));
    }

    #[test]
    fn test_draft_serialization() {
        let mut draft = TaskDraft::new("Pay rent");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0);
        let v = serde_json::to_value(&draft).unwrap();
        assert_eq!(v["dueDate"], "2024-07-01T09:30:00");
        assert_eq!(v["priority"], "MEDIUM");
        assert!(TaskDraft::new("   ").validate().is_err());
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::due_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default, with = "due_date")]
    pub reminder_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub task_id: i64,
    /// Local wall-clock time; sent to the server as a UTC instant.
    #[serde(serialize_with = "due_date::utc_instant::serialize")]
    pub reminder_time: Option<NaiveDateTime>,
}

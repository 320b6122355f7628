use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Task, TaskStatus};

/// Status tally shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Completed share of the total, rounded to a whole percent.
    pub completion_rate: u32,
}

impl TaskStats {
    pub fn tally(tasks: &[Task]) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
        }
        if stats.total > 0 {
            stats.completion_rate =
                ((stats.completed as f64 / stats.total as f64) * 100.0).round() as u32;
        }
        stats
    }
}

pub fn overdue_count(tasks: &[Task], now: NaiveDateTime) -> usize {
    tasks.iter().filter(|t| t.is_overdue(now)).count()
}

/// Warning shown once when the dashboard loads, if anything is overdue.
pub fn overdue_notice(count: usize) -> Option<String> {
    (count > 0).then(|| format!("You have {count} overdue tasks!"))
}

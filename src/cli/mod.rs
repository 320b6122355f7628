pub mod admin;
pub mod auth;
pub mod calendar;
pub mod commands;
pub mod profile;
pub mod reminder;
pub mod task;

pub use commands::*;

use chrono::NaiveDateTime;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{due_date, Priority, SortDirection, SortField, TaskStatus};

/// What every command runner needs.
pub struct Context {
    pub client: ApiClient,
    pub page_size: u32,
    pub json: bool,
}

pub(crate) fn parse_status(value: &str) -> Result<TaskStatus, TaskdeskError> {
    TaskStatus::from_str(value).ok_or_else(|| {
        TaskdeskError::validation(format!(
            "Unknown status '{value}'. Expected PENDING, IN_PROGRESS or COMPLETED."
        ))
    })
}

pub(crate) fn parse_priority(value: &str) -> Result<Priority, TaskdeskError> {
    Priority::from_str(value).ok_or_else(|| {
        TaskdeskError::validation(format!("Unknown priority '{value}'. Expected LOW, MEDIUM or HIGH."))
    })
}

/// `all` means no filter.
pub(crate) fn parse_status_filter(value: &str) -> Result<Option<TaskStatus>, TaskdeskError> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_status(value).map(Some)
}

pub(crate) fn parse_priority_filter(value: &str) -> Result<Option<Priority>, TaskdeskError> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_priority(value).map(Some)
}

pub(crate) fn parse_sort(
    field: Option<&str>,
    dir: Option<&str>,
) -> Result<(SortField, SortDirection), TaskdeskError> {
    let field = match field {
        Some(f) => SortField::from_str(f).ok_or_else(|| {
            TaskdeskError::validation(format!(
                "Unknown sort field '{f}'. Expected createdAt, dueDate or priority."
            ))
        })?,
        None => SortField::default(),
    };
    let dir = match dir {
        Some(d) => SortDirection::from_str(d)
            .ok_or_else(|| TaskdeskError::validation(format!("Unknown sort direction '{d}'")))?,
        None => SortDirection::default(),
    };
    Ok((field, dir))
}

pub(crate) fn parse_date_time(value: &str) -> Result<NaiveDateTime, TaskdeskError> {
    due_date::parse_input(value).ok_or_else(|| {
        TaskdeskError::validation(format!(
            "Invalid date '{value}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]."
        ))
    })
}

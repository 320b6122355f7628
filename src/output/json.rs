use serde_json::{json, Value};

use crate::error::TaskdeskError;
use crate::models::due_date::WIRE_FORMAT;
use crate::models::{Reminder, Task, User};
use crate::view::{PageInfo, TaskStats};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskdeskError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

fn date_time(value: Option<chrono::NaiveDateTime>) -> Value {
    match value {
        Some(dt) => json!(dt.format(WIRE_FORMAT).to_string()),
        None => Value::Null,
    }
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "due_date": date_time(t.due_date)
    })
}

pub fn task_detail(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "due_date": date_time(t.due_date),
        "created_at": date_time(t.created_at),
        "archived": t.archived
    })
}

pub fn task_list<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Value {
    json!(tasks.into_iter().map(task_summary).collect::<Vec<_>>())
}

pub fn page_info_json(p: &PageInfo) -> Value {
    json!({
        "page": p.page,
        "size": p.size,
        "total_elements": p.total_elements,
        "total_pages": p.total_pages,
        "has_previous": p.has_previous(),
        "has_next": p.has_next()
    })
}

pub fn user_json(u: &User) -> Value {
    json!({
        "id": u.id,
        "username": u.username,
        "email": u.email,
        "role": u.role.as_str()
    })
}

pub fn reminder_json(r: &Reminder) -> Value {
    json!({
        "id": r.id,
        "task_id": r.task_id,
        "reminder_time": date_time(r.reminder_time),
        "sent": r.sent
    })
}

pub fn stats_json(s: &TaskStats) -> Value {
    json!({
        "total": s.total,
        "pending": s.pending,
        "in_progress": s.in_progress,
        "completed": s.completed,
        "completion_rate": s.completion_rate
    })
}

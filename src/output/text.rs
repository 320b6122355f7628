use crate::models::due_date::WIRE_FORMAT;
use crate::models::{Reminder, Task, User};
use crate::view::calendar::WEEKDAY_NAMES;
use crate::view::{PageInfo, TaskStats, YearMonth};

fn short_date(value: Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", t.status.label());
    println!("  Priority: {}", t.priority.as_str());
    if let Some(due) = t.due_date {
        println!("  Due: {}", due.format(WIRE_FORMAT));
    }
    if let Some(created) = t.created_at {
        println!("  Created: {}", created.format(WIRE_FORMAT));
    }
    if t.archived {
        println!("  Archived");
    }
}

pub fn print_task_list<'a>(tasks: impl IntoIterator<Item = &'a Task>) {
    let mut any = false;
    for t in tasks {
        any = true;
        println!(
            "  [{}] {} ({}) p={} due={}",
            t.status.as_str(),
            t.title,
            t.id,
            t.priority.as_str(),
            short_date(t.due_date)
        );
    }
    if !any {
        println!("No tasks found.");
    }
}

pub fn print_page_info(p: &PageInfo) {
    println!(
        "Page {}/{} ({} tasks, {} per page)",
        p.page + 1,
        p.total_pages.max(1),
        p.total_elements,
        p.size
    );
}

pub fn print_calendar(month: YearMonth, grid: &[Option<u32>], counts: impl Fn(u32) -> usize) {
    println!("{month}");
    println!(
        "{}",
        WEEKDAY_NAMES
            .iter()
            .map(|d| format!("{d:>6}"))
            .collect::<String>()
    );
    for week in grid.chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => match counts(*day) {
                    0 => format!("{day:>6}"),
                    n => format!("{:>6}", format!("{day}*{n}")),
                },
                None => " ".repeat(6),
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

pub fn print_user(u: &User) {
    println!("User: {} ({})", u.username, u.id);
    if !u.email.is_empty() {
        println!("  Email: {}", u.email);
    }
    println!("  Role: {}", u.role.as_str());
}

pub fn print_user_list(users: &[User]) {
    if users.is_empty() {
        println!("No users found.");
        return;
    }
    for u in users {
        println!("  {} ({}) [{}] {}", u.username, u.id, u.role.as_str(), u.email);
    }
}

pub fn print_reminders(reminders: &[Reminder]) {
    if reminders.is_empty() {
        println!("No reminders found.");
        return;
    }
    for r in reminders {
        let task = r.task_id.map(|id| id.to_string()).unwrap_or_else(|| "?".into());
        let sent = if r.sent { " (sent)" } else { "" };
        println!("  #{} task={} at {}{}", r.id, task, short_date(r.reminder_time), sent);
    }
}

pub fn print_stats(s: &TaskStats) {
    println!("Tasks: {}", s.total);
    println!(
        "  pending={} in_progress={} completed={}",
        s.pending, s.in_progress, s.completed
    );
    println!("  Completion rate: {}%", s.completion_rate);
}

use serde_json::json;

use crate::cli::commands::ReminderCommands;
use crate::cli::{parse_date_time, Context};
use crate::error::TaskdeskError;
use crate::models::{NewReminder, Reminder};
use crate::output;

pub async fn run(cmd: ReminderCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        ReminderCommands::Add { task_id, time } => run_add(ctx, task_id, &time).await,
        ReminderCommands::List { task_id } => match ctx.client.reminders_for_task(task_id).await {
            Ok(reminders) => print_reminders(ctx, &reminders),
            Err(e) => Err(e),
        },
        ReminderCommands::Pending => match ctx.client.pending_reminders().await {
            Ok(reminders) => print_reminders(ctx, &reminders),
            Err(e) => Err(e),
        },
        ReminderCommands::Delete { id } => run_delete(ctx, id).await,
    };
    output::finish(result, ctx.json)
}

async fn run_add(ctx: &Context, task_id: i64, time: &str) -> Result<i32, TaskdeskError> {
    let reminder = NewReminder {
        task_id,
        reminder_time: Some(parse_date_time(time)?),
    };
    let created = ctx.client.create_reminder(&reminder).await?;
    if ctx.json {
        output::print_json(&output::json::success(output::json::reminder_json(&created)));
    } else {
        println!("Created reminder {} for task {task_id}", created.id);
    }
    Ok(0)
}

fn print_reminders(ctx: &Context, reminders: &[Reminder]) -> Result<i32, TaskdeskError> {
    if ctx.json {
        let items: Vec<_> = reminders.iter().map(output::json::reminder_json).collect();
        output::print_json(&output::json::success(json!(items)));
    } else {
        output::text::print_reminders(reminders);
    }
    Ok(0)
}

async fn run_delete(ctx: &Context, id: i64) -> Result<i32, TaskdeskError> {
    ctx.client.delete_reminder(id).await?;
    if ctx.json {
        output::print_json(&output::json::success(json!({ "id": id, "deleted": true })));
    } else {
        println!("Deleted reminder {id}");
    }
    Ok(0)
}

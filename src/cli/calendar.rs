use serde_json::{json, Value};

use crate::cli::Context;
use crate::error::TaskdeskError;
use crate::output;
use crate::view::calendar::CalendarMode;
use crate::view::{CalendarViewModel, YearMonth};

pub async fn run(ctx: &Context, month: Option<String>, day: Option<u32>, all: bool) -> i32 {
    output::finish(show(ctx, month.as_deref(), day, all).await, ctx.json)
}

async fn show(
    ctx: &Context,
    month: Option<&str>,
    day: Option<u32>,
    all: bool,
) -> Result<i32, TaskdeskError> {
    let month = match month {
        Some(text) => YearMonth::parse(text).ok_or_else(|| {
            TaskdeskError::validation(format!("Invalid month '{text}'. Use YYYY-MM."))
        })?,
        None => YearMonth::current(),
    };
    let mode = if all {
        CalendarMode::FullCollection
    } else {
        CalendarMode::DateRange
    };

    let mut vm = CalendarViewModel::new(ctx.client.clone(), month, mode);
    vm.refresh().await?;
    if day.is_some() {
        vm.select_day(day);
        if vm.selected_day().is_none() {
            return Err(TaskdeskError::validation(format!(
                "{month} has no day {}",
                day.unwrap_or_default()
            )));
        }
    }

    let grid = vm.days_grid();
    if ctx.json {
        let cells: Vec<Value> = grid
            .iter()
            .map(|cell| match cell {
                Some(d) => json!({
                    "day": d,
                    "task_ids": vm.tasks_for_day(Some(*d)).iter().map(|t| t.id).collect::<Vec<_>>()
                }),
                None => Value::Null,
            })
            .collect();
        output::print_json(&output::json::success(json!({
            "month": format!("{:04}-{:02}", month.year(), month.month()),
            "label": month.to_string(),
            "days": cells,
            "selected_day": vm.selected_day(),
            "selected_tasks": output::json::task_list(vm.selected_tasks())
        })));
    } else {
        output::text::print_calendar(month, &grid, |d| vm.tasks_for_day(Some(d)).len());
        if let Some(selected) = vm.selected_day() {
            println!();
            println!("Tasks for {} {selected}, {}:", month.name(), month.year());
            output::text::print_task_list(vm.selected_tasks());
        }
    }
    Ok(0)
}

use chrono::Local;
use serde_json::json;

use crate::api::TaskSource;
use crate::cli::commands::TaskCommands;
use crate::cli::{
    parse_date_time, parse_priority, parse_priority_filter, parse_sort, parse_status,
    parse_status_filter, Context,
};
use crate::error::TaskdeskError;
use crate::models::{Task, TaskDraft};
use crate::output;
use crate::view::stats::{overdue_count, overdue_notice, TaskStats};
use crate::view::{QueryState, TaskViewModel};

pub async fn run(cmd: TaskCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        TaskCommands::List {
            page,
            size,
            status,
            priority,
            sort,
            dir,
            search,
        } => {
            let listing = Listing {
                page,
                size: size.unwrap_or(ctx.page_size),
                status,
                priority,
                sort,
                dir,
                search: search.unwrap_or_default(),
            };
            run_list(ctx, listing).await
        }
        TaskCommands::Show { id } => run_show(ctx, id).await,
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
        } => run_add(ctx, title, description, &priority, due.as_deref()).await,
        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
        } => {
            let edit = Edit {
                title,
                description,
                priority,
                due,
                clear_due,
            };
            run_edit(ctx, id, edit).await
        }
        TaskCommands::Status { id, status } => run_status(ctx, id, &status).await,
        TaskCommands::Delete { id } => run_delete(ctx, id).await,
        TaskCommands::Archive { id } => run_archive(ctx, id, true).await,
        TaskCommands::Unarchive { id } => run_archive(ctx, id, false).await,
        TaskCommands::Archived => run_archived(ctx).await,
        TaskCommands::Search {
            keyword,
            page,
            size,
        } => run_search(ctx, &keyword, page, size).await,
        TaskCommands::Overdue => run_overdue(ctx).await,
    };
    output::finish(result, ctx.json)
}

/// Overdue warning first, then page 0 of the task list with default sorting.
pub async fn run_dashboard(ctx: &Context) -> i32 {
    output::finish(dashboard(ctx).await, ctx.json)
}

struct Listing {
    page: u32,
    size: u32,
    status: String,
    priority: String,
    sort: Option<String>,
    dir: Option<String>,
    search: String,
}

struct Edit {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
    clear_due: bool,
}

fn print_page<S: TaskSource>(
    ctx: &Context,
    vm: &TaskViewModel<S>,
    extras: Vec<(&str, serde_json::Value)>,
) {
    let visible = vm.derived_view();
    let info = vm.page_info();
    if ctx.json {
        let mut data = json!({
            "tasks": output::json::task_list(visible.iter().copied()),
            "pagination": output::json::page_info_json(&info),
            "search": vm.query().search
        });
        for (key, value) in extras {
            data[key] = value;
        }
        output::print_json(&output::json::success(data));
    } else {
        output::text::print_task_list(visible.iter().copied());
        output::text::print_page_info(&info);
    }
}

async fn run_list(ctx: &Context, listing: Listing) -> Result<i32, TaskdeskError> {
    if listing.size == 0 {
        return Err(TaskdeskError::validation("--size must be at least 1"));
    }
    let (sort_by, sort_dir) = parse_sort(listing.sort.as_deref(), listing.dir.as_deref())?;
    let query = QueryState {
        page: listing.page,
        size: listing.size,
        sort_by,
        sort_dir,
        status: parse_status_filter(&listing.status)?,
        priority: parse_priority_filter(&listing.priority)?,
        search: listing.search,
    };

    let mut vm = TaskViewModel::with_query(ctx.client.clone(), query);
    vm.load_page(listing.page).await?;
    print_page(ctx, &vm, Vec::new());
    Ok(0)
}

async fn dashboard(ctx: &Context) -> Result<i32, TaskdeskError> {
    let notice = match ctx.client.overdue_tasks().await {
        Ok(tasks) => overdue_notice(tasks.len()),
        Err(e) => {
            tracing::warn!(error = %e, "overdue check failed");
            None
        }
    };
    let stats = match ctx.client.all_tasks().await {
        Ok(tasks) => {
            let overdue = overdue_count(&tasks, Local::now().naive_local());
            Some((TaskStats::tally(&tasks), overdue))
        }
        Err(e) => {
            tracing::warn!(error = %e, "task stats unavailable");
            None
        }
    };
    if !ctx.json {
        if let Some(ref message) = notice {
            println!("Warning: {message}");
        }
        if let Some((ref tally, overdue)) = stats {
            output::text::print_stats(tally);
            println!("  Overdue: {overdue}");
            println!();
        }
    }

    let mut vm = TaskViewModel::with_query(
        ctx.client.clone(),
        QueryState {
            size: ctx.page_size,
            ..QueryState::default()
        },
    );
    vm.load_page(0).await?;
    let stats_json = stats.map(|(tally, overdue)| {
        let mut value = output::json::stats_json(&tally);
        value["overdue"] = json!(overdue);
        value
    });
    print_page(
        ctx,
        &vm,
        vec![("overdue_notice", json!(notice)), ("stats", json!(stats_json))],
    );
    Ok(0)
}

fn print_detail(ctx: &Context, task: &Task, verb: &str) {
    if ctx.json {
        output::print_json(&output::json::success(output::json::task_detail(task)));
    } else {
        if !verb.is_empty() {
            println!("{verb} task {}", task.id);
        }
        output::text::print_task(task);
    }
}

async fn run_show(ctx: &Context, id: i64) -> Result<i32, TaskdeskError> {
    let task = ctx.client.get_task(id).await?;
    print_detail(ctx, &task, "");
    Ok(0)
}

async fn run_add(
    ctx: &Context,
    title: String,
    description: Option<String>,
    priority: &str,
    due: Option<&str>,
) -> Result<i32, TaskdeskError> {
    let mut draft = TaskDraft::new(title);
    draft.description = description.filter(|d| !d.trim().is_empty());
    draft.priority = parse_priority(priority)?;
    draft.due_date = due.map(parse_date_time).transpose()?;

    let task = ctx.client.create_task(&draft).await?;
    print_detail(ctx, &task, "Created");
    Ok(0)
}

async fn run_edit(ctx: &Context, id: i64, edit: Edit) -> Result<i32, TaskdeskError> {
    let current = ctx.client.get_task(id).await?;
    let mut draft = TaskDraft::from_task(&current);
    if let Some(title) = edit.title {
        draft.title = title;
    }
    if let Some(description) = edit.description {
        draft.description = Some(description).filter(|d| !d.trim().is_empty());
    }
    if let Some(ref priority) = edit.priority {
        draft.priority = parse_priority(priority)?;
    }
    if let Some(ref due) = edit.due {
        draft.due_date = Some(parse_date_time(due)?);
    }
    if edit.clear_due {
        draft.due_date = None;
    }

    let task = ctx.client.update_task(id, &draft).await?;
    print_detail(ctx, &task, "Updated");
    Ok(0)
}

async fn run_status(ctx: &Context, id: i64, status: &str) -> Result<i32, TaskdeskError> {
    let status = parse_status(status)?;
    let task = ctx.client.update_task_status(id, status).await?;
    if ctx.json {
        output::print_json(&output::json::success(output::json::task_summary(&task)));
    } else {
        println!("Task {} is now {}", task.id, task.status.label());
    }
    Ok(0)
}

fn print_done(ctx: &Context, id: i64, key: &str, message: String) {
    if ctx.json {
        let mut data = json!({ "id": id });
        data[key] = json!(true);
        output::print_json(&output::json::success(data));
    } else {
        println!("{message}");
    }
}

async fn run_delete(ctx: &Context, id: i64) -> Result<i32, TaskdeskError> {
    ctx.client.delete_task(id).await?;
    print_done(ctx, id, "deleted", format!("Deleted task {id}"));
    Ok(0)
}

async fn run_archive(ctx: &Context, id: i64, archive: bool) -> Result<i32, TaskdeskError> {
    if archive {
        ctx.client.archive_task(id).await?;
        print_done(ctx, id, "archived", format!("Archived task {id}"));
    } else {
        ctx.client.unarchive_task(id).await?;
        print_done(ctx, id, "unarchived", format!("Restored task {id}"));
    }
    Ok(0)
}

fn print_tasks(ctx: &Context, tasks: &[Task]) {
    if ctx.json {
        output::print_json(&output::json::success(output::json::task_list(tasks)));
    } else {
        output::text::print_task_list(tasks);
    }
}

async fn run_archived(ctx: &Context) -> Result<i32, TaskdeskError> {
    let tasks = ctx.client.archived_tasks().await?;
    print_tasks(ctx, &tasks);
    Ok(0)
}

async fn run_search(ctx: &Context, keyword: &str, page: u32, size: u32) -> Result<i32, TaskdeskError> {
    if keyword.trim().is_empty() {
        return Err(TaskdeskError::validation("Search keyword must not be empty"));
    }
    let result = ctx.client.search_tasks(keyword, page, size).await?;
    if ctx.json {
        output::print_json(&output::json::success(json!({
            "tasks": output::json::task_list(&result.content),
            "page": result.number,
            "total_elements": result.total_elements,
            "total_pages": result.total_pages
        })));
    } else {
        output::text::print_task_list(&result.content);
        println!(
            "Page {}/{} ({} matches)",
            result.number + 1,
            result.total_pages.max(1),
            result.total_elements
        );
    }
    Ok(0)
}

async fn run_overdue(ctx: &Context) -> Result<i32, TaskdeskError> {
    let tasks = ctx.client.overdue_tasks().await?;
    tracing::debug!(count = tasks.len(), "overdue tasks fetched");
    if ctx.json {
        output::print_json(&output::json::success(json!({
            "notice": overdue_notice(tasks.len()),
            "tasks": output::json::task_list(&tasks)
        })));
    } else {
        if let Some(message) = overdue_notice(tasks.len()) {
            println!("Warning: {message}");
        }
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

use serde_json::json;

use crate::cli::commands::AdminCommands;
use crate::cli::{parse_sort, Context};
use crate::error::TaskdeskError;
use crate::models::Role;
use crate::output;
use crate::view::TaskStats;

pub async fn run(cmd: AdminCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        AdminCommands::Users => run_users(ctx).await,
        AdminCommands::User { id } => run_user(ctx, id).await,
        AdminCommands::DeleteUser { id } => run_delete_user(ctx, id).await,
        AdminCommands::Role { id, role } => run_role(ctx, id, &role).await,
        AdminCommands::Tasks {
            page,
            size,
            sort,
            dir,
        } => run_tasks(ctx, page, size, sort.as_deref(), dir.as_deref()).await,
        AdminCommands::Stats => run_stats(ctx).await,
    };
    output::finish(result, ctx.json)
}

async fn run_users(ctx: &Context) -> Result<i32, TaskdeskError> {
    let users = ctx.client.users().await?;
    if ctx.json {
        let items: Vec<_> = users.iter().map(output::json::user_json).collect();
        output::print_json(&output::json::success(json!(items)));
    } else {
        output::text::print_user_list(&users);
    }
    Ok(0)
}

async fn run_user(ctx: &Context, id: i64) -> Result<i32, TaskdeskError> {
    let user = ctx.client.user(id).await?;
    if ctx.json {
        output::print_json(&output::json::success(output::json::user_json(&user)));
    } else {
        output::text::print_user(&user);
    }
    Ok(0)
}

async fn run_delete_user(ctx: &Context, id: i64) -> Result<i32, TaskdeskError> {
    ctx.client.delete_user(id).await?;
    if ctx.json {
        output::print_json(&output::json::success(json!({ "id": id, "deleted": true })));
    } else {
        println!("Deleted user {id}");
    }
    Ok(0)
}

async fn run_role(ctx: &Context, id: i64, role: &str) -> Result<i32, TaskdeskError> {
    let role = Role::from_str(role).ok_or_else(|| {
        TaskdeskError::validation(format!("Unknown role '{role}'. Expected USER or ADMIN."))
    })?;
    ctx.client.update_user_role(id, role).await?;
    if ctx.json {
        output::print_json(&output::json::success(json!({ "id": id, "role": role.as_str() })));
    } else {
        println!("User {id} is now {}", role.as_str());
    }
    Ok(0)
}

async fn run_tasks(
    ctx: &Context,
    page: u32,
    size: u32,
    sort: Option<&str>,
    dir: Option<&str>,
) -> Result<i32, TaskdeskError> {
    let (sort_by, sort_dir) = parse_sort(sort, dir)?;
    let result = ctx.client.admin_tasks(page, size, sort_by, sort_dir).await?;
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
            "Page {}/{} ({} tasks)",
            result.number + 1,
            result.total_pages.max(1),
            result.total_elements
        );
    }
    Ok(0)
}

async fn run_stats(ctx: &Context) -> Result<i32, TaskdeskError> {
    let tasks = ctx.client.admin_tasks_simple().await?;
    let stats = TaskStats::tally(&tasks);
    if ctx.json {
        output::print_json(&output::json::success(output::json::stats_json(&stats)));
    } else {
        output::text::print_stats(&stats);
    }
    Ok(0)
}

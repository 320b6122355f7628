use serde_json::json;

use crate::cli::commands::ProfileCommands;
use crate::cli::Context;
use crate::error::TaskdeskError;
use crate::models::{PasswordChange, ProfileUpdate, User};
use crate::output;

pub async fn run(cmd: ProfileCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        ProfileCommands::Show => match ctx.client.current_user().await {
            Ok(user) => print_user(ctx, &user, ""),
            Err(e) => Err(e),
        },
        ProfileCommands::Update { username, email } => run_update(ctx, username, email).await,
        ProfileCommands::Password {
            current,
            new,
            confirm,
        } => run_password(ctx, current, new, &confirm).await,
    };
    output::finish(result, ctx.json)
}

fn print_user(ctx: &Context, user: &User, heading: &str) -> Result<i32, TaskdeskError> {
    if ctx.json {
        output::print_json(&output::json::success(output::json::user_json(user)));
    } else {
        if !heading.is_empty() {
            println!("{heading}");
        }
        output::text::print_user(user);
    }
    Ok(0)
}

async fn run_update(
    ctx: &Context,
    username: Option<String>,
    email: Option<String>,
) -> Result<i32, TaskdeskError> {
    if username.is_none() && email.is_none() {
        return Err(TaskdeskError::validation("Nothing to update. Pass --username and/or --email."));
    }
    // The backend replaces both fields.
    let current = ctx.client.current_user().await?;
    let update = ProfileUpdate {
        username: username.unwrap_or(current.username),
        email: email.unwrap_or(current.email),
    };
    if update.username.trim().is_empty() || update.email.trim().is_empty() {
        return Err(TaskdeskError::validation("Username and email must not be empty"));
    }
    let user = ctx.client.update_profile(&update).await?;
    print_user(ctx, &user, "Profile updated.")
}

async fn run_password(
    ctx: &Context,
    current: String,
    new: String,
    confirm: &str,
) -> Result<i32, TaskdeskError> {
    let change = PasswordChange::confirmed(current, new, confirm)?;
    ctx.client.change_password(&change).await?;
    if ctx.json {
        output::print_json(&output::json::success(json!({ "password_changed": true })));
    } else {
        println!("Password changed.");
    }
    Ok(0)
}

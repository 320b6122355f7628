use serde_json::json;

use crate::cli::Context;
use crate::error::TaskdeskError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::output;

pub async fn run_login(ctx: &Context, username: String, password: String) -> i32 {
    output::finish(login(ctx, username, password).await, ctx.json)
}

pub async fn run_register(
    ctx: &Context,
    username: String,
    email: String,
    password: String,
    confirm: Option<String>,
) -> i32 {
    output::finish(register(ctx, username, email, password, confirm).await, ctx.json)
}

pub fn run_logout(ctx: &Context) -> i32 {
    output::finish(logout(ctx), ctx.json)
}

pub fn run_whoami(ctx: &Context) -> i32 {
    let username = ctx.client.session().current_username();
    if ctx.json {
        output::print_json(&output::json::success(json!({
            "logged_in": ctx.client.session().token().is_some(),
            "username": username,
            "session_file": ctx.client.session().location().map(|p| p.display().to_string())
        })));
        return 0;
    }
    match (ctx.client.session().token(), username) {
        (None, _) => println!("Not logged in."),
        (Some(_), Some(name)) => println!("Logged in as {name}"),
        (Some(_), None) => println!("Logged in (username unknown)"),
    }
    0
}

async fn login(ctx: &Context, username: String, password: String) -> Result<i32, TaskdeskError> {
    if username.is_empty() || password.is_empty() {
        return Err(TaskdeskError::validation("Please enter username and password"));
    }
    let response = ctx.client.login(&LoginRequest { username, password }).await?;
    let username = response
        .username
        .clone()
        .or_else(|| ctx.client.session().current_username());

    if ctx.json {
        output::print_json(&output::json::success(json!({
            "username": username,
            "role": response.role
        })));
    } else {
        match username {
            Some(name) => println!("Logged in as {name}"),
            None => println!("Logged in"),
        }
    }
    Ok(0)
}

async fn register(
    ctx: &Context,
    username: String,
    email: String,
    password: String,
    confirm: Option<String>,
) -> Result<i32, TaskdeskError> {
    let confirmation = confirm.unwrap_or_else(|| password.clone());
    let request = RegisterRequest {
        username,
        email,
        password,
    };
    request.validate(&confirmation)?;
    ctx.client.register(&request).await?;

    if ctx.json {
        output::print_json(&output::json::success(json!({ "username": request.username })));
    } else {
        println!("Registered {}. You can now log in.", request.username);
    }
    Ok(0)
}

fn logout(ctx: &Context) -> Result<i32, TaskdeskError> {
    ctx.client.logout()?;
    if ctx.json {
        output::print_json(&output::json::success(json!({ "logged_out": true })));
    } else {
        println!("Logged out.");
    }
    Ok(0)
}

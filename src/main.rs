use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use taskdesk::api::ApiClient;
use taskdesk::cli::commands::{Cli, Commands};
use taskdesk::cli::{self, Context};
use taskdesk::config::{Config, Overrides};
use taskdesk::error::TaskdeskError;
use taskdesk::output;
use taskdesk::session::Session;

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_context(cli_args: &Cli) -> Result<Context, TaskdeskError> {
    let config = Config::load(&Overrides {
        config_path: cli_args.config.clone(),
        base_url: cli_args.api_url.clone(),
        session_file: cli_args.session_file.clone(),
        log_level: cli_args.log_level.clone(),
    })?;
    init_logging(&config.log_level);
    tracing::debug!(base_url = %config.base_url, session = %config.session_file.display(), "config loaded");

    let client = ApiClient::new(&config.base_url, Session::file(&config.session_file))?
        .with_username_param(config.send_username);
    Ok(Context {
        client,
        page_size: config.page_size,
        json: cli_args.json,
    })
}

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();
    let ctx = match build_context(&cli_args) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::print_error(&e, cli_args.json);
            process::exit(1);
        }
    };

    let exit_code = match cli_args.command {
        Commands::Login { username, password } => cli::auth::run_login(&ctx, username, password).await,
        Commands::Register {
            username,
            email,
            password,
            confirm,
        } => cli::auth::run_register(&ctx, username, email, password, confirm).await,
        Commands::Logout => cli::auth::run_logout(&ctx),
        Commands::Whoami => cli::auth::run_whoami(&ctx),
        Commands::Dashboard => cli::task::run_dashboard(&ctx).await,
        Commands::Task(cmd) => cli::task::run(cmd, &ctx).await,
        Commands::Calendar { month, day, all } => cli::calendar::run(&ctx, month, day, all).await,
        Commands::Reminder(cmd) => cli::reminder::run(cmd, &ctx).await,
        Commands::Profile(cmd) => cli::profile::run(cmd, &ctx).await,
        Commands::Admin(cmd) => cli::admin::run(cmd, &ctx).await,
    };

    process::exit(exit_code);
}

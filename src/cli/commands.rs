use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskdesk",
    version = VERSION,
    about = "Command-line client for the personal task manager",
    after_help = "\
NOTE:
  All data lives on the backend. `taskdesk login` stores the bearer token in the
  session file; every later request re-reads it and sends `Authorization: Bearer`.

CONFIG:
  Flags > environment (TASKDESK_*) > config.toml > defaults.
  Default API URL: http://localhost:8080/api

EXIT CODES:
  0  Success
  1  Error (network, backend rejection, validation, config)

BEHAVIOR NOTES:
  `task list --search` filters the fetched page only. Page counts still describe
  the unsearched result set, so a page may show fewer rows than it reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (TOML)
    #[arg(long, global = true, env = "TASKDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true, env = "TASKDESK_API_URL")]
    pub api_url: Option<String>,

    /// Where the session token is stored
    #[arg(long, global = true, env = "TASKDESK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. warn, debug)
    #[arg(long, global = true, env = "TASKDESK_LOG")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the username recorded in the session token (not verified)
    Whoami,

    /// Overdue check, then the first page of tasks
    Dashboard,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Month view of tasks by due date
    Calendar {
        /// Month to show as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// List the tasks due on this day
        #[arg(long)]
        day: Option<u32>,
        /// Load every task once instead of querying the month's date range
        #[arg(long)]
        all: bool,
    },

    /// Task reminders
    #[command(subcommand)]
    Reminder(ReminderCommands),

    /// Your account
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Administration (admin role required)
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List one page of your tasks
    #[command(after_help = "\
NOTE:
  --status/--priority/--sort are sent to the backend; --search filters the page
  that comes back. Use `all` to clear a filter.")]
    List {
        #[arg(long, default_value = "0")]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
        /// PENDING, IN_PROGRESS, COMPLETED or all
        #[arg(long, default_value = "all")]
        status: String,
        /// LOW, MEDIUM, HIGH or all
        #[arg(long, default_value = "all")]
        priority: String,
        /// createdAt, dueDate or priority
        #[arg(long)]
        sort: Option<String>,
        /// asc or desc
        #[arg(long)]
        dir: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one task
    Show { id: i64 },
    /// Create a task
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "MEDIUM")]
        priority: String,
        /// Due date, e.g. 2024-06-01T09:00 or 2024-06-01
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a task; unspecified fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Set a task's status
    Status { id: i64, status: String },
    /// Delete a task
    Delete { id: i64 },
    /// Archive a task
    Archive { id: i64 },
    /// Restore an archived task
    Unarchive { id: i64 },
    /// List archived tasks
    Archived,
    /// Keyword search on the backend
    Search {
        keyword: String,
        #[arg(long, default_value = "0")]
        page: u32,
        #[arg(long, default_value = "10")]
        size: u32,
    },
    /// List overdue tasks
    Overdue,
}

#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Set a reminder for a task
    Add {
        task_id: i64,
        /// When to remind, e.g. 2024-06-01T08:00
        time: String,
    },
    /// Reminders of one task
    List { task_id: i64 },
    /// Reminders not yet sent
    Pending,
    /// Delete a reminder
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,
    /// Change username and/or email
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change your password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List all users
    Users,
    /// Show one user
    User { id: i64 },
    /// Delete a user
    DeleteUser { id: i64 },
    /// Change a user's role (USER or ADMIN)
    Role { id: i64, role: String },
    /// Every user's tasks, paged
    Tasks {
        #[arg(long, default_value = "0")]
        page: u32,
        #[arg(long, default_value = "10")]
        size: u32,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        dir: Option<String>,
    },
    /// Task counts by status across all users
    Stats,
}

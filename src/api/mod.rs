pub mod admin;
pub mod auth;
pub mod client;
pub mod reminders;
pub mod source;
pub mod tasks;
pub mod users;

pub use client::ApiClient;
pub use source::TaskSource;

pub mod auth;
pub mod due_date;
pub mod page;
pub mod query;
pub mod reminder;
pub mod task;
pub mod user;

pub use auth::*;
pub use page::*;
pub use query::*;
pub use reminder::*;
pub use task::*;
pub use user::*;

pub mod calendar;
pub mod stats;
pub mod task_list;

pub use calendar::{CalendarViewModel, Direction, YearMonth};
pub use stats::TaskStats;
pub use task_list::{FilterChange, LoadOutcome, PageInfo, QueryState, TaskViewModel};

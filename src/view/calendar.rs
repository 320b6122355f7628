//! Month grid with tasks bucketed by due date.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::api::TaskSource;
use crate::error::TaskdeskError;
use crate::models::Task;
use crate::view::LoadOutcome;

pub use crate::models::due_date::normalize_value as normalize_due_date;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month; `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// `YYYY-MM`.
    pub fn parse(text: &str) -> Option<Self> {
        let (year, month) = text.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Shift by whole months, carrying into the year.
    pub fn shifted(self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.shifted(1).first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Inclusive range from the 1st at 00:00:00 to the last day at 23:59:59.
    pub fn range(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.first_day().and_time(NaiveTime::MIN);
        let last = self.shifted(1).first_day().pred_opt().unwrap_or(self.first_day());
        let end = last.and_hms_opt(23, 59, 59).unwrap_or(start);
        (start, end)
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at.year() == self.year && at.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn delta(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Where the calendar's tasks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    /// Fetch `GET /tasks/calendar` for the displayed month on every move.
    DateRange,
    /// The whole collection is loaded once and assumed current; moving
    /// between months only re-buckets it.
    FullCollection,
}

/// Leading `None` padding for the weekday of the 1st, then `Some(1..=N)`.
pub fn days_grid(month: YearMonth) -> Vec<Option<u32>> {
    let padding = month.first_weekday() as usize;
    std::iter::repeat(None)
        .take(padding)
        .chain((1..=month.days_in_month()).map(Some))
        .collect()
}

/// Tasks due on `day` of `month`. Padding cells and undated tasks match nothing.
pub fn tasks_on<'a>(tasks: &'a [Task], month: YearMonth, day: Option<u32>) -> Vec<&'a Task> {
    let Some(day) = day else { return Vec::new() };
    tasks
        .iter()
        .filter(|t| {
            t.due_date
                .is_some_and(|due| month.contains(due) && due.day() == day)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarTicket {
    generation: u64,
    month: YearMonth,
}

pub struct CalendarViewModel<S> {
    source: S,
    mode: CalendarMode,
    month: YearMonth,
    tasks: Vec<Task>,
    selected_day: Option<u32>,
    issued: u64,
    applied: u64,
}

impl<S: TaskSource> CalendarViewModel<S> {
    pub fn new(source: S, month: YearMonth, mode: CalendarMode) -> Self {
        Self {
            source,
            mode,
            month,
            tasks: Vec::new(),
            selected_day: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.selected_day
    }

    /// Replace the collection with one fetched elsewhere.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn days_grid(&self) -> Vec<Option<u32>> {
        days_grid(self.month)
    }

    pub fn tasks_for_day(&self, day: Option<u32>) -> Vec<&Task> {
        tasks_on(&self.tasks, self.month, day)
    }

    /// Padding cells and days past the end of the month are ignored.
    pub fn select_day(&mut self, day: Option<u32>) {
        if let Some(day) = day.filter(|d| (1..=self.month.days_in_month()).contains(d)) {
            self.selected_day = Some(day);
        }
    }

    pub fn selected_tasks(&self) -> Vec<&Task> {
        self.tasks_for_day(self.selected_day)
    }

    pub fn begin_refresh(&mut self) -> CalendarTicket {
        self.issued += 1;
        CalendarTicket {
            generation: self.issued,
            month: self.month,
        }
    }

    /// A failed or superseded fetch leaves the current buckets in place.
    pub fn apply_refresh(
        &mut self,
        ticket: CalendarTicket,
        result: Result<Vec<Task>, TaskdeskError>,
    ) -> Result<LoadOutcome, TaskdeskError> {
        let stale = ticket.generation < self.applied
            || (self.mode == CalendarMode::DateRange && ticket.month != self.month);
        if stale {
            tracing::debug!(month = %ticket.month, "discarding stale calendar tasks");
            return Ok(LoadOutcome::Discarded);
        }
        let tasks = result?;
        self.tasks = tasks;
        self.applied = ticket.generation;
        Ok(LoadOutcome::Applied)
    }

    pub async fn refresh(&mut self) -> Result<LoadOutcome, TaskdeskError> {
        let ticket = self.begin_refresh();
        let result = match self.mode {
            CalendarMode::DateRange => {
                let (start, end) = ticket.month.range();
                self.source.fetch_tasks_between(start, end).await
            }
            CalendarMode::FullCollection => self.source.fetch_all_tasks().await,
        };
        self.apply_refresh(ticket, result)
    }

    /// Move one month back or forward. The selection belongs to the old
    /// month and is cleared.
    pub async fn navigate(&mut self, direction: Direction) -> Result<LoadOutcome, TaskdeskError> {
        self.month = self.month.shifted(direction.delta());
        self.selected_day = None;
        match self.mode {
            CalendarMode::DateRange => self.refresh().await,
            CalendarMode::FullCollection => Ok(LoadOutcome::NoFetch),
        }
    }
}

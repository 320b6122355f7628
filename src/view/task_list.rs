//! Dashboard task list: a server-paginated page of tasks, narrowed further
//! on the client by a free-text search.
//!
//! Status/priority filters and sorting are server-side and always refetch
//! from page 0. The search term only filters the page already in memory,
//! so the pagination metadata keeps describing the unsearched server
//! result set even when fewer rows are visible.

use serde::Serialize;

use crate::api::TaskSource;
use crate::error::TaskdeskError;
use crate::models::{Page, Priority, SortDirection, SortField, Task, TaskQuery, TaskStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Status(Option<TaskStatus>),
    Priority(Option<Priority>),
    Search(String),
}

impl FilterChange {
    /// Parse `(kind, value)` pairs as typed by a user, where `all` clears a
    /// status or priority filter.
    pub fn parse(kind: &str, value: &str) -> Result<Self, TaskdeskError> {
        let is_all = value.trim().eq_ignore_ascii_case("all");
        match kind.trim().to_ascii_lowercase().as_str() {
            "status" if is_all => Ok(Self::Status(None)),
            "status" => TaskStatus::from_str(value)
                .map(|s| Self::Status(Some(s)))
                .ok_or_else(|| TaskdeskError::validation(format!("Unknown status: {value}"))),
            "priority" if is_all => Ok(Self::Priority(None)),
            "priority" => Priority::from_str(value)
                .map(|p| Self::Priority(Some(p)))
                .ok_or_else(|| TaskdeskError::validation(format!("Unknown priority: {value}"))),
            "search" => Ok(Self::Search(value.to_string())),
            _ => Err(TaskdeskError::validation(format!("Unknown filter: {kind}"))),
        }
    }
}

/// Everything the user has chosen about what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::CreatedAt,
            sort_dir: SortDirection::Desc,
            status: None,
            priority: None,
            search: String::new(),
        }
    }
}

impl QueryState {
    /// The server-side part of the state; the search term is not sent.
    pub fn server_query(&self) -> TaskQuery {
        TaskQuery {
            page: self.page,
            size: self.size,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
            status: self.status,
            priority: self.priority,
        }
    }
}

/// Always satisfies `page < max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl PageInfo {
    fn from_page(page: &Page<Task>, requested_size: u32) -> Self {
        let last_index = page.total_pages.max(1) - 1;
        Self {
            page: page.number.min(last_index),
            size: if page.size == 0 { requested_size } else { page.size },
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Identifies one in-flight load: a generation number plus the server
/// query it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    query: TaskQuery,
}

impl LoadTicket {
    pub fn query(&self) -> &TaskQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the page and its metadata.
    Applied,
    /// The response belonged to a superseded query and was dropped.
    Discarded,
    /// The change was client-side only; nothing was requested.
    NoFetch,
}

pub struct TaskViewModel<S> {
    source: S,
    query: QueryState,
    tasks: Vec<Task>,
    page_info: PageInfo,
    issued: u64,
    applied: u64,
}

impl<S: TaskSource> TaskViewModel<S> {
    pub fn new(source: S) -> Self {
        Self::with_query(source, QueryState::default())
    }

    pub fn with_query(source: S, query: QueryState) -> Self {
        let page_info = PageInfo {
            page: 0,
            size: query.size,
            total_elements: 0,
            total_pages: 0,
        };
        Self {
            source,
            query,
            tasks: Vec::new(),
            page_info,
            issued: 0,
            applied: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The raw page as last returned by the server.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn page_info(&self) -> PageInfo {
        self.page_info
    }

    /// Record a request for `page` under the current query and hand back the
    /// ticket its response must be applied with.
    pub fn begin_load(&mut self, page: u32) -> LoadTicket {
        self.query.page = page;
        self.issued += 1;
        LoadTicket {
            generation: self.issued,
            query: self.query.server_query(),
        }
    }

    /// Apply a response. Responses for a query that is no longer current, or
    /// older than the data already shown, are discarded whether they
    /// succeeded or not. A current failure leaves the shown data untouched.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Page<Task>, TaskdeskError>,
    ) -> Result<LoadOutcome, TaskdeskError> {
        if ticket.generation < self.applied || ticket.query != self.query.server_query() {
            tracing::debug!(generation = ticket.generation, "discarding stale task page");
            return Ok(LoadOutcome::Discarded);
        }
        match result {
            Ok(page) => {
                self.page_info = PageInfo::from_page(&page, ticket.query.size);
                self.query.page = self.page_info.page;
                self.tasks = page.content;
                self.applied = ticket.generation;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                if ticket.generation == self.issued {
                    self.query.page = self.page_info.page;
                }
                Err(e)
            }
        }
    }

    pub async fn load_page(&mut self, page: u32) -> Result<LoadOutcome, TaskdeskError> {
        let ticket = self.begin_load(page);
        let result = self.source.fetch_tasks(&ticket.query).await;
        self.apply_load(ticket, result)
    }

    pub async fn set_filter(&mut self, change: FilterChange) -> Result<LoadOutcome, TaskdeskError> {
        match change {
            FilterChange::Status(status) => {
                self.query.status = status;
                self.load_page(0).await
            }
            FilterChange::Priority(priority) => {
                self.query.priority = priority;
                self.load_page(0).await
            }
            FilterChange::Search(term) => {
                self.query.search = term;
                Ok(LoadOutcome::NoFetch)
            }
        }
    }

    /// Same field flips the direction; a new field starts descending.
    pub async fn set_sort(&mut self, field: SortField) -> Result<LoadOutcome, TaskdeskError> {
        self.query.sort_dir = if field == self.query.sort_by {
            self.query.sort_dir.flipped()
        } else {
            SortDirection::Desc
        };
        self.query.sort_by = field;
        self.load_page(0).await
    }

    /// The raw page narrowed by the search term. Recomputed on every call.
    pub fn derived_view(&self) -> Vec<&Task> {
        derive_view(&self.tasks, &self.query.search)
    }
}

/// Tasks whose title or description contains `search`, ignoring case.
/// A blank search keeps everything.
pub fn derive_view<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.iter().collect();
    }
    tasks.iter().filter(|t| t.matches_search(&needle)).collect()
}

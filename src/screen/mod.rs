//! Generic per-screen data lifecycle.
//!
//! Every list or detail screen owns one `ResourceController` per resource it
//! shows and renders from the `QueryState` it exposes.

pub mod controller;
pub mod search;

pub use controller::ResourceController;
pub use search::Searchable;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Ready,
    Error,
    Empty,
}

/// What a screen renders: status, last payload, message and refresh flags
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: Status,
    pub data: Option<T>,
    pub error_message: Option<String>,
    /// Pull-to-refresh in progress; `data` stays visible
    pub refreshing: bool,
    /// Next page being appended
    pub loading_more: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error_message: None,
            refreshing: false,
            loading_more: false,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

/// Pagination position of a paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub page: u32,
    pub has_more: bool,
}

impl Cursor {
    pub fn first_page() -> Self {
        Self { page: 1, has_more: false }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::first_page()
    }
}

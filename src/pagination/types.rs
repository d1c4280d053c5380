//! Pagination types and traits
//!
//! Defines the executor seam and the results produced by a paginated fetch.

use crate::data::{Row, RunReportRequest, RunReportResponse};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Runs one report request against the reporting service
///
/// Implemented by `DataClient`; tests supply fakes.
#[async_trait]
pub trait ReportExecutor: Send + Sync {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse>;
}

/// Which `rowCount` the loop compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalRowsPolicy {
    /// Use the `rowCount` of the most recent page
    #[default]
    Refresh,
    /// Use the `rowCount` of the first page for the whole fetch
    Snapshot,
}

/// Progress of one `fetch_all` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationState {
    /// Rows received across all pages so far
    pub rows_received: u64,
    /// Requests issued so far, including a failed one
    pub request_count: u32,
    /// Total the loop is currently working towards
    pub total_rows: u64,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every reported row has been received
    pub fn is_complete(&self) -> bool {
        self.rows_received >= self.total_rows
    }

    pub(crate) fn record_request(&mut self) {
        self.request_count += 1;
    }

    pub(crate) fn record_page(&mut self, rows: usize, total_rows: u64) {
        self.rows_received += rows as u64;
        self.total_rows = total_rows;
    }
}

/// All pages of a completed fetch, in issuance order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPages {
    pub pages: Vec<RunReportResponse>,
    pub state: PaginationState,
}

impl ReportPages {
    /// Rows of every page concatenated, preserving server order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }

    pub fn row_count(&self) -> u64 {
        self.state.rows_received
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count
    }
}

/// A fetch that stopped before all rows were received
///
/// `pages` holds every page that completed before `error` occurred.
#[derive(Debug, thiserror::Error)]
#[error("paginated fetch stopped after {} page(s): {error}", pages.len())]
pub struct IncompleteFetch {
    pub pages: Vec<RunReportResponse>,
    pub state: PaginationState,
    #[source]
    pub error: Error,
}

impl IncompleteFetch {
    pub(crate) fn new(pages: Vec<RunReportResponse>, state: PaginationState, error: Error) -> Self {
        Self {
            pages,
            state,
            error,
        }
    }

    /// The executor error (or malformed-response error), unchanged
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Drop the partial pages and keep the underlying error
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl From<IncompleteFetch> for Error {
    fn from(incomplete: IncompleteFetch) -> Self {
        Error::IncompleteFetch {
            pages_received: incomplete.pages.len(),
            source: Box::new(incomplete.error),
        }
    }
}

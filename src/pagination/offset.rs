//! Row offset pagination for report queries

use super::types::{IncompleteFetch, PaginationState, ReportExecutor, ReportPages, TotalRowsPolicy};
use crate::data::{RunReportRequest, RunReportResponse};
use crate::error::{Error, Result};
use tracing::{info, warn};

/// Drives `runReport` with increasing offsets until `rowCount` is satisfied
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetPaginator {
    policy: TotalRowsPolicy,
}

impl OffsetPaginator {
    /// Create a paginator that re-reads `rowCount` from every page
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how `rowCount` is tracked across pages
    #[must_use]
    pub fn with_policy(mut self, policy: TotalRowsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch every page of `base`
    pub async fn fetch_all<E>(
        &self,
        executor: &E,
        base: &RunReportRequest,
    ) -> std::result::Result<ReportPages, IncompleteFetch>
    where
        E: ReportExecutor + ?Sized,
    {
        self.fetch_all_with(executor, base, |_, _| Ok(())).await
    }

    /// Fetch every page of `base`, handing each page to `on_page` as soon as
    /// it has been counted
    ///
    /// The first request always starts at offset 0; request *k+1* starts at
    /// the number of rows received through request *k*. An error from
    /// `on_page` stops the fetch before another request is sent; the page it
    /// was given is kept in the returned `IncompleteFetch`.
    pub async fn fetch_all_with<E, F>(
        &self,
        executor: &E,
        base: &RunReportRequest,
        mut on_page: F,
    ) -> std::result::Result<ReportPages, IncompleteFetch>
    where
        E: ReportExecutor + ?Sized,
        F: FnMut(&RunReportResponse, &PaginationState) -> Result<()>,
    {
        if base.offset != 0 {
            warn!(
                offset = base.offset,
                "Base request has a non-zero offset, paginating from row 0"
            );
        }

        let mut state = PaginationState::new();
        let mut pages: Vec<RunReportResponse> = Vec::new();
        let mut request = base.with_offset(0);
        let mut snapshot: Option<u64> = None;

        loop {
            state.record_request();
            info!(
                offset = request.offset,
                limit = ?request.limit,
                "Sending request #{}",
                state.request_count
            );

            let response = match executor.run_report(&request).await {
                Ok(response) => response,
                Err(error) => return Err(IncompleteFetch::new(pages, state, error)),
            };

            let reported = match reported_total(&response) {
                Ok(total) => total,
                Err(error) => return Err(IncompleteFetch::new(pages, state, error)),
            };
            let total = match self.policy {
                TotalRowsPolicy::Refresh => reported,
                TotalRowsPolicy::Snapshot => *snapshot.get_or_insert(reported),
            };

            let received = response.rows.len();
            state.record_page(received, total);
            info!(
                "{} rows received for request #{} ({} of {})",
                received, state.request_count, state.rows_received, state.total_rows
            );
            let handled = on_page(&response, &state);
            pages.push(response);
            if let Err(error) = handled {
                return Err(IncompleteFetch::new(pages, state, error));
            }

            if state.is_complete() {
                break;
            }

            // An empty page short of the total would repeat the same offset forever
            if received == 0 {
                let error = Error::malformed(format!(
                    "empty page at offset {} while {} of {} rows received",
                    request.offset, state.rows_received, state.total_rows
                ));
                return Err(IncompleteFetch::new(pages, state, error));
            }

            let next_offset = match i64::try_from(state.rows_received) {
                Ok(offset) => offset,
                Err(_) => {
                    let error = Error::malformed("row offset exceeds i64");
                    return Err(IncompleteFetch::new(pages, state, error));
                }
            };
            request = base.with_offset(next_offset);
        }

        Ok(ReportPages { pages, state })
    }
}

/// Validate and read `rowCount`
///
/// The server omits `rowCount` when it is zero, so a missing count is only
/// accepted on a page without rows.
fn reported_total(response: &RunReportResponse) -> Result<u64> {
    match response.row_count {
        Some(count) => u64::try_from(count)
            .map_err(|_| Error::malformed(format!("negative rowCount {count}"))),
        None if response.rows.is_empty() => Ok(0),
        None => Err(Error::malformed(format!(
            "rowCount missing from a page with {} rows",
            response.rows.len()
        ))),
    }
}

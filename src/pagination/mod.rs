//! Pagination module
//!
//! Supports: row offset (Data API reports) and page token (Admin API lists)
//!
//! # Overview
//!
//! `OffsetPaginator::fetch_all` re-issues a report request with an increasing
//! `offset` until the rows received cover the `rowCount` reported by the
//! server. Pages are requested strictly one after another. An executor
//! failure is never retried here; it comes back as an `IncompleteFetch`
//! carrying the pages already received.
//!
//! `token_stream` follows `nextPageToken` links and flattens the pages into
//! a stream of items.

mod offset;
mod token;
mod types;

pub use offset::OffsetPaginator;
pub use token::{token_stream, TokenPage};
pub use types::{IncompleteFetch, PaginationState, ReportExecutor, ReportPages, TotalRowsPolicy};

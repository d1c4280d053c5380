// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Analytics Samples
//!
//! Typed clients and runnable samples for the Google Analytics Admin API
//! (accounts, properties) and Data API (reports, funnel reports).
//!
//! ## Features
//!
//! - **Offset pagination**: fetch every row of a report, `limit` rows at a time
//! - **Token pagination**: stream Admin API listings across `nextPageToken`s
//! - **Credentials**: service account keys, authorized users, bearer tokens
//! - **Transport**: retries with backoff, rate limiting, Google error decoding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use analytics_samples::config::Settings;
//! use analytics_samples::pagination::OffsetPaginator;
//! use analytics_samples::samples::pagination_report;
//!
//! #[tokio::main]
//! async fn main() -> analytics_samples::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let client = settings.data_client()?;
//!
//!     let request = pagination_report("123456789", 10_000);
//!     let pages = OffsetPaginator::new().fetch_all(&client, &request).await?;
//!     println!("{} rows in {} requests", pages.row_count(), pages.request_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 CLI (accounts, properties, report,           │
//! │                      paginate, funnel)                       │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────────┬───┴──────────┬────────────┬────────┐
//! │ Samples  │  Pagination  │ Admin / Data │    HTTP    │  Auth  │
//! ├──────────┼──────────────┼──────────────┼────────────┼────────┤
//! │ Requests │ Offset       │ Accounts     │ Retry      │ SA JWT │
//! │ Printers │ Page token   │ Properties   │ Rate Limit │ OAuth2 │
//! │          │              │ Reports      │ Backoff    │ Bearer │
//! └──────────┴──────────────┴──────────────┴────────────┴────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and token exchange
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Offset and page token pagination
pub mod pagination;

/// Data API: reports and funnel reports
pub mod data;

/// Admin API: accounts and properties
pub mod admin;

/// Ready-made report requests
pub mod samples;

/// Response printers
pub mod output;

/// Settings file and environment
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use admin::AdminClient;
pub use data::DataClient;
pub use pagination::{IncompleteFetch, OffsetPaginator, ReportExecutor, ReportPages};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! CLI module
//!
//! Command-line interface for the analytics samples.
//!
//! # Commands
//!
//! - `accounts` - List every account visible to the credentials
//! - `properties` - List the properties of an account, trashed ones included
//! - `report` - Daily `first_open` event counts for the last week
//! - `paginate` - Acquisition report fetched page by page
//! - `funnel` - Five-step funnel report broken down by device

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

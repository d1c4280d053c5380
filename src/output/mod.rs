//! Output module
//!
//! Renders API responses to any `std::io::Write`.
//!
//! # Formats
//!
//! - `pretty` - the human-readable layout of each sample
//! - `json` - one JSON document per response (or per listed item)

mod printer;

pub use printer::{OutputFormat, Printer};

#[cfg(test)]
mod tests;

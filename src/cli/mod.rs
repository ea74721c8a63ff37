//! CLI module
//!
//! Command-line interface over [`crate::ApiClient`].
//!
//! # Commands
//!
//! - `get` - Fetch one response
//! - `pages` - Follow the cursor, one JSON line per page
//! - `items` - Follow the cursor, one JSON line per result item

mod commands;
mod runner;

pub use commands::{Cli, Commands, RequestArgs};
pub use runner::Runner;

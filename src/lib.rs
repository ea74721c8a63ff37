#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # disqust
//!
//! A minimal client for the Disqus REST API.
//!
//! ## Features
//!
//! - **Single requests**: `ApiClient::json` fetches `{base}/{resource}.json`
//!   with default parameters (credentials) merged under per-call ones
//! - **Cursor pagination**: lazy streams of whole pages or of flattened items
//! - **Response history**: the last ten responses, including failed ones
//! - **Rate limit introspection**: `X-Ratelimit-Remaining` of the last response
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use disqust::{ApiClient, ClientConfig, Method, Params, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder().api_key("PUBLIC_KEY").build();
//!     let client = ApiClient::with_config(config)?;
//!
//!     let params = Params::new().with("forum", "disqus").with("limit", 100);
//!     let mut threads = client.items("forums/listThreads", Method::GET, params);
//!     while let Some(thread) = threads.try_next().await? {
//!         println!("{}", thread["title"]);
//!     }
//!
//!     println!("calls left: {:?}", client.rate_limit_remaining());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  pages() → Stream<Page>   items() → Stream<Value>
//! └──────────────────────┬───────────────────────┘
//!                        │ cursor = page.cursor.next
//! ┌──────────────────────┴───────────────────────┐
//! │  ApiClient::json   defaults ⊕ params, history │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │  Transport (reqwest)                          │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
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

/// Request parameter maps
pub mod params;

/// Client configuration
pub mod config;

/// API client, transport and response history
pub mod http;

/// Cursor pagination streams
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{ApiClient, RecordedResponse};
pub use pagination::{Cursor, Items, Page, Pages};
pub use params::Params;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Pagination module
//!
//! Cursor traversal over Disqus list endpoints.
//!
//! # Overview
//!
//! Each response carries a `cursor` object. While `cursor.hasNext` is true the
//! next request repeats the previous parameters with `cursor` set to
//! `cursor.next`. [`Pages`] yields whole responses; [`Items`] yields the
//! entries of each response's `response` array.
//!
//! ```rust,ignore
//! use disqust::{ApiClient, Method, Params};
//! use futures::TryStreamExt;
//!
//! let client = ApiClient::new()?;
//! let params = Params::new().with("forum", "disqus").with("limit", 100);
//! let mut posts = client.items("forums/listPosts", Method::GET, params);
//! while let Some(post) = posts.try_next().await? {
//!     println!("{}", post["id"]);
//! }
//! ```

mod stream;
mod types;

pub use stream::{Items, Pages};
pub use types::{Cursor, Page};

//! Bounded response history
//!
//! The client records every response it receives, successful or not, so
//! callers can inspect the last one (and its rate-limit headers) after the
//! fact. Only the most recent `capacity` responses are kept.

use super::rate_limit::{RateLimitInfo, RATE_LIMIT_REMAINING_HEADER};
use crate::types::Method;
use reqwest::header::HeaderMap;
use std::collections::vec_deque::{self, VecDeque};

/// One response as observed by the client
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    /// Method of the request that produced this response
    pub method: Method,
    /// Requested URL, without query string
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: String,
}

impl RecordedResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value as text; `None` if absent or not valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw `X-Ratelimit-Remaining` value
    pub fn rate_limit_remaining(&self) -> Option<&str> {
        self.header(RATE_LIMIT_REMAINING_HEADER)
    }

    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        RateLimitInfo::from_headers(&self.headers)
    }
}

/// Fixed-capacity FIFO of recent responses
#[derive(Debug, Clone)]
pub struct ResponseHistory {
    entries: VecDeque<RecordedResponse>,
    capacity: usize,
}

impl ResponseHistory {
    /// Create an empty history; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a response, evicting the oldest one when full
    pub fn push(&mut self, response: RecordedResponse) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(response);
    }

    /// Most recently appended response
    pub fn last(&self) -> Option<&RecordedResponse> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest to newest
    pub fn iter(&self) -> vec_deque::Iter<'_, RecordedResponse> {
        self.entries.iter()
    }
}

impl Default for ResponseHistory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_CAPACITY)
    }
}

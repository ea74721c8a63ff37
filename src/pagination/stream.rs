//! Lazy page and item streams
//!
//! Both streams are pull-driven: nothing is fetched until the consumer polls,
//! and each poll performs at most one request. Dropping a stream abandons the
//! traversal. After an error the stream is finished.

use super::types::Page;
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::params::Params;
use crate::types::{JsonValue, Method};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::debug;

/// What the traversal does on the next pull
enum Step {
    Fetch(Params),
    Fail(Error),
    Done,
}

/// Stream of [`Page`]s following `cursor.next` until `hasNext` is false
pub struct Pages<'a> {
    inner: BoxStream<'a, Result<Page>>,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(client: &'a ApiClient, resource: String, method: Method, params: Params) -> Self {
        let inner = stream::try_unfold(Step::Fetch(params), move |step| {
            let resource = resource.clone();
            async move {
                let mut params = match step {
                    Step::Fetch(params) => params,
                    Step::Fail(err) => return Err(err),
                    Step::Done => return Ok(None),
                };

                let page = Page::from_value(client.json(&resource, method, &params).await?)?;

                let next = match page.cursor.continuation() {
                    Ok(Some(token)) => {
                        params.set_cursor(token);
                        Step::Fetch(params)
                    }
                    Ok(None) => {
                        debug!("{} exhausted", resource);
                        Step::Done
                    }
                    Err(err) => Step::Fail(err),
                };
                Ok::<_, Error>(Some((page, next)))
            }
        })
        .boxed();

        Self { inner }
    }

    /// Fetch the next page; `Ok(None)` once the cursor reports no more pages
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        self.try_next().await
    }

    /// Flatten into a stream of result items
    pub fn items(self) -> Items<'a> {
        Items::new(self)
    }
}

impl Stream for Pages<'_> {
    type Item = Result<Page>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for Pages<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages").finish_non_exhaustive()
    }
}

pin_project! {
    /// Stream of result items, page order then in-page order
    ///
    /// The next page is requested only after every item of the current one
    /// has been yielded.
    pub struct Items<'a> {
        #[pin]
        pages: Pages<'a>,
        buffered: VecDeque<JsonValue>,
    }
}

impl<'a> Items<'a> {
    pub(crate) fn new(pages: Pages<'a>) -> Self {
        Self {
            pages,
            buffered: VecDeque::new(),
        }
    }

    /// Next item; `Ok(None)` once every page is consumed
    pub async fn next_item(&mut self) -> Result<Option<JsonValue>> {
        self.try_next().await
    }
}

impl Stream for Items<'_> {
    type Item = Result<JsonValue>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(item) = this.buffered.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }
            match ready!(this.pages.as_mut().poll_next(cx)) {
                Some(Ok(page)) => this.buffered.extend(page.response),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => return Poll::Ready(None),
            }
        }
    }
}

impl std::fmt::Debug for Items<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Items")
            .field("buffered", &self.buffered.len())
            .finish_non_exhaustive()
    }
}

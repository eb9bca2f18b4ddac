//! Page-by-page iteration over BoldDesk list endpoints.
//!
//! [`Paginator`] walks a list endpoint one page at a time. The consumer
//! pulls items; a new request is issued only once the previous page has
//! been drained, so there is never more than one page in flight.
//!
//! End of data is detected, in order, from an empty page, from the server's
//! `count` when the request asked for one, and from a page shorter than
//! `perPage`. A final page that happens to be exactly `perPage` long with no
//! `count` costs one extra (empty) request.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{
    query::{clamp_per_page, Query, MAX_PER_PAGE},
    rate_limit::RateLimitTracker,
    types::PagedResponse,
    Error,
};

type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<PagedResponse<T>, Error>> + Send + 'a>>;
type FetchFn<'a, T, Q> = Box<dyn FnMut(Q) -> PageFuture<'a, T> + Send + 'a>;

/// Receives human-readable status lines as pages arrive.
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Sync);

/// Cooperative cancellation flag, checked before each page request.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lazy sequence over every item matching a query.
pub struct Paginator<'a, T, Q> {
    fetch: FetchFn<'a, T, Q>,
    query: Q,
    per_page: u32,
    buffer: VecDeque<T>,
    fetched: u64,
    pages: u32,
    finished: bool,
    rate_limiter: Option<&'a RateLimitTracker>,
    cancel: Option<CancellationToken>,
    progress: Option<ProgressFn<'a>>,
}

impl<'a, T, Q> Paginator<'a, T, Q>
where
    T: Send + 'a,
    Q: Query + Clone,
{
    /// Creates a paginator starting at the query's page. A query without a
    /// page size is given [`MAX_PER_PAGE`] so short pages can be detected;
    /// larger sizes are cut down to it, since the server never returns more.
    pub fn new<F, Fut>(mut query: Q, mut fetch: F) -> Self
    where
        F: FnMut(Q) -> Fut + Send + 'a,
        Fut: Future<Output = Result<PagedResponse<T>, Error>> + Send + 'a,
    {
        let per_page = clamp_per_page(query.common().per_page.unwrap_or(MAX_PER_PAGE));
        query.get_common().per_page = Some(per_page);
        Self {
            fetch: Box::new(move |q| -> PageFuture<'a, T> { Box::pin(fetch(q)) }),
            query,
            per_page,
            buffer: VecDeque::new(),
            fetched: 0,
            pages: 0,
            finished: false,
            rate_limiter: None,
            cancel: None,
            progress: None,
        }
    }

    /// Consults `tracker` before every request and waits when the budget is low.
    pub fn with_rate_limiter(mut self, tracker: &'a RateLimitTracker) -> Self {
        self.rate_limiter = Some(tracker);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Items emitted so far.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Requests issued so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.buffer.is_empty()
    }

    /// Next item, fetching another page when the current one is drained.
    pub async fn next(&mut self) -> Result<Option<T>, Error> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            match self.next_page().await? {
                Some(items) => self.buffer.extend(items),
                None => return Ok(None),
            }
        }
    }

    /// Fetches the next page. `Ok(None)` once the data is exhausted or the
    /// sequence was cancelled. An error ends the sequence.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, Error> {
        if self.finished {
            return Ok(None);
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            tracing::debug!("Pagination cancelled after {} pages", self.pages);
            self.finish();
            return Ok(None);
        }

        if let Some(limiter) = self.rate_limiter {
            limiter.wait_if_needed().await;
        }

        let page = self.query.common().page;
        tracing::debug!("Fetching page {} ({} per page)", page, self.per_page);
        let response = match (self.fetch)(self.query.clone()).await {
            Ok(response) => response,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };
        self.pages += 1;

        let received = response.result.len();
        if received == 0 {
            self.finish();
            return Ok(None);
        }
        self.fetched += received as u64;

        if response.count > 0 && self.fetched >= response.count {
            self.finished = true;
        } else if (received as u64) < u64::from(self.per_page) {
            self.finished = true;
        } else {
            self.query.get_common().page = page + 1;
        }

        self.report(&format!("Fetched {} so far...", self.fetched));
        if self.finished {
            self.finish();
        }
        Ok(Some(response.result))
    }

    /// Drains the whole sequence into a vector.
    pub async fn collect_all(mut self) -> Result<Vec<T>, Error> {
        let mut items: Vec<T> = self.buffer.drain(..).collect();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    fn finish(&mut self) {
        self.finished = true;
        self.report(&format!("Completed: {} items fetched", self.fetched));
    }

    fn report(&self, message: &str) {
        if let Some(progress) = self.progress {
            progress(message);
        }
    }
}

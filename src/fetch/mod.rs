use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{AppError, Result};

pub mod client;
pub mod decode;
pub mod request;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use client::PageClient;
pub use request::{end_of_day_stamp, Endpoint, PageQuery};
pub use source::{HttpPageSource, PageSource};

pub type FetchResult<T> = Result<T>;

#[inline]
pub fn ensure_concurrency_limit(limit: usize) -> usize {
    limit.max(1)
}

/// Shared admission control for outbound requests.
///
/// One permit is held for the lifetime of a single request. The limiter is
/// cloned into every fetch path of a run, so the cap applies to the sum of all
/// symbols' page requests rather than to any one symbol.
#[derive(Debug, Clone)]
pub struct RequestLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl RequestLimiter {
    pub fn new(concurrency: usize) -> Self {
        let capacity = ensure_concurrency_limit(concurrency);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a free slot. The returned guard gives the slot back on drop.
    pub async fn acquire(&self) -> FetchResult<OwnedSemaphorePermit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| AppError::LimiterClosed)
    }
}

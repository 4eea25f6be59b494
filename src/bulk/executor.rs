//! Ordered batch executor.

use futures::StreamExt;
use std::future::Future;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStrategy {
    /// One item at a time, in order.
    Sequential,
    /// Up to `max_concurrency` items in flight.
    Concurrent { max_concurrency: usize },
}

impl Default for BatchStrategy {
    fn default() -> Self {
        BatchStrategy::Sequential
    }
}

impl BatchStrategy {
    /// Concurrency only for engines that declare it safe.
    pub fn for_engine(supports_concurrency: bool, max_concurrency: usize) -> Self {
        if supports_concurrency && max_concurrency > 1 {
            BatchStrategy::Concurrent { max_concurrency }
        } else {
            BatchStrategy::Sequential
        }
    }
}

/// Per-item results in input order.
#[derive(Debug, Clone)]
pub struct BatchRun<R> {
    pub results: Vec<R>,
    pub execution_time: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    strategy: BatchStrategy,
}

impl BatchExecutor {
    pub fn new(strategy: BatchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> BatchStrategy {
        self.strategy
    }

    /// Runs `executor_fn` once per item.
    ///
    /// Item futures return values, never errors, so one item cannot stop its
    /// siblings. Dropping the returned future drops every in-flight item.
    pub async fn execute<T, R, F, Fut>(&self, items: Vec<T>, executor_fn: F) -> BatchRun<R>
    where
        F: Fn(usize, T) -> Fut,
        Fut: Future<Output = R>,
    {
        let start = Instant::now();
        let results = match self.strategy {
            BatchStrategy::Sequential => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    out.push(executor_fn(i, item).await);
                }
                out
            }
            BatchStrategy::Concurrent { max_concurrency } => {
                let mut indexed: Vec<(usize, R)> = futures::stream::iter(items.into_iter().enumerate())
                    .map(|(i, item)| {
                        let fut = executor_fn(i, item);
                        async move { (i, fut.await) }
                    })
                    .buffer_unordered(max_concurrency.max(1))
                    .collect()
                    .await;
                indexed.sort_by_key(|(i, _)| *i);
                indexed.into_iter().map(|(_, r)| r).collect()
            }
        };
        BatchRun {
            results,
            execution_time: start.elapsed(),
        }
    }
}

//! Concurrent page aggregation.
//!
//! Page 1 is fetched first to learn the page count, then one tokio task is
//! spawned per remaining page. Tasks push their items into a channel as they
//! finish; the join walks the handles in spawn order and the first failure it
//! reaches fails the whole aggregation. Unjoined handles are dropped, which
//! detaches those tasks rather than aborting them, so in-flight requests still
//! run to completion.

use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use crate::error::SdkError;

/// One page of a listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based total page count declared by the server.
    pub number_of_pages: u32,
}

/// Fan-out behaviour for paged listings.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Cap on in-flight page workers. `None` spawns every page at once.
    /// Values are clamped to `1..=Semaphore::MAX_PERMITS`.
    pub max_concurrent_pages: Option<usize>,
    /// Also fetch page `P`. Off by default: the backend listing has always been
    /// read as pages `1..P`, and the last declared page is skipped.
    pub include_last_page: bool,
}

impl PageOptions {
    /// Page indices handed to workers once page 1 has declared `number_of_pages`.
    pub fn worker_pages(&self, number_of_pages: u32) -> RangeInclusive<u32> {
        let last = if self.include_last_page {
            number_of_pages
        } else {
            number_of_pages.saturating_sub(1)
        };
        2..=last
    }
}

/// Fetch every page of a listing and merge the items.
///
/// Items from page 1 come first; the rest follow in the order workers finish.
/// Only completeness is guaranteed, not order.
pub async fn collect_pages<T, F, Fut>(fetch: F, options: &PageOptions) -> Result<Vec<T>, SdkError>
where
    T: Send + 'static,
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<T>, SdkError>> + Send + 'static,
{
    let first = fetch(1).await?;
    let pages = options.worker_pages(first.number_of_pages);
    let mut items = first.items;

    if pages.is_empty() {
        return Ok(items);
    }

    tracing::debug!(
        number_of_pages = first.number_of_pages,
        workers = pages.clone().count(),
        "fanning out page fetches"
    );

    let fetch = Arc::new(fetch);
    let limiter = options
        .max_concurrent_pages
        .map(|n| Arc::new(Semaphore::new(n.clamp(1, Semaphore::MAX_PERMITS))));
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<T>>();

    let handles: Vec<_> = pages
        .map(|page| {
            let fetch = Arc::clone(&fetch);
            let limiter = limiter.clone();
            let tx = tx.clone();
            let handle = tokio::spawn(async move {
                let _permit = match limiter {
                    Some(sem) => Some(
                        sem.acquire_owned()
                            .await
                            .map_err(|e| SdkError::Task(e.to_string()))?,
                    ),
                    None => None,
                };
                let result = fetch(page).await?;
                // The receiver outlives every worker that is joined.
                let _ = tx.send(result.items);
                Ok::<(), SdkError>(())
            });
            (page, handle)
        })
        .collect();
    drop(tx);

    for (page, handle) in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(page, error = %e, "page worker failed");
                return Err(e);
            }
            Err(join) => return Err(SdkError::Task(format!("page {page}: {join}"))),
        }
    }

    while let Ok(batch) = rx.try_recv() {
        items.extend(batch);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Every page `n` returns `n` items labelled `(n, i)`.
    fn listing(
        number_of_pages: u32,
        calls: Arc<Mutex<Vec<u32>>>,
        failing: HashSet<u32>,
    ) -> impl Fn(u32) -> std::pin::Pin<Box<dyn Future<Output = Result<Page<(u32, u32)>, SdkError>> + Send>>
           + Send
           + Sync
           + 'static {
        move |page| {
            calls.lock().unwrap().push(page);
            let fail = failing.contains(&page);
            Box::pin(async move {
                // Later pages finish first to shake up arrival order.
                tokio::time::sleep(Duration::from_millis(u64::from(20 - page.min(20)))).await;
                if fail {
                    return Err(SdkError::Http(HttpError::ServerError {
                        status: 500,
                        body: format!("page {page}"),
                    }));
                }
                Ok(Page {
                    items: (0..page).map(|i| (page, i)).collect(),
                    number_of_pages,
                })
            })
        }
    }

    #[test]
    fn test_worker_pages_skip_last_by_default() {
        let opts = PageOptions::default();
        assert!(opts.worker_pages(0).is_empty());
        assert!(opts.worker_pages(1).is_empty());
        assert!(opts.worker_pages(2).is_empty());
        assert_eq!(opts.worker_pages(3).collect::<Vec<_>>(), vec![2]);
        assert_eq!(opts.worker_pages(6).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_worker_pages_with_last_page() {
        let opts = PageOptions {
            include_last_page: true,
            ..Default::default()
        };
        assert!(opts.worker_pages(1).is_empty());
        assert_eq!(opts.worker_pages(2).collect::<Vec<_>>(), vec![2]);
        assert_eq!(opts.worker_pages(4).collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_fetch_counts_and_completeness() {
        for p in 1..=8u32 {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let fetch = listing(p, calls.clone(), HashSet::new());
            let items = collect_pages(fetch, &PageOptions::default()).await.unwrap();

            let calls = calls.lock().unwrap().clone();
            let workers = p.saturating_sub(2) as usize;
            assert_eq!(calls.len(), 1 + workers, "P = {p}");
            assert_eq!(calls.iter().filter(|&&c| c == 1).count(), 1);

            let fetched: HashSet<u32> = calls.iter().copied().collect();
            let expected: usize = fetched.iter().map(|&n| n as usize).sum();
            assert_eq!(items.len(), expected, "P = {p}");

            let distinct: HashSet<(u32, u32)> = items.iter().copied().collect();
            assert_eq!(distinct.len(), items.len());
        }
    }

    #[tokio::test]
    async fn test_page_one_items_come_first() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let items = collect_pages(listing(5, calls, HashSet::new()), &PageOptions::default())
            .await
            .unwrap();
        assert_eq!(items[0], (1, 0));
        assert_eq!(items.len(), 1 + 2 + 3 + 4);
    }

    #[tokio::test]
    async fn test_any_failing_worker_fails_the_aggregation() {
        for failing in [vec![2], vec![5], vec![3, 4], vec![2, 3, 4, 5]] {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let fetch = listing(6, calls, failing.iter().copied().collect());
            let result = collect_pages(fetch, &PageOptions::default()).await;
            let err = result.expect_err("aggregation must not return partial data");
            assert!(err.is_transport());
        }
    }

    #[tokio::test]
    async fn test_first_page_failure_spawns_nothing() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fetch = listing(6, calls.clone(), [1].into_iter().collect());
        assert!(collect_pages(fetch, &PageOptions::default()).await.is_err());
        assert_eq!(*calls.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_concurrency_bound_is_respected() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let opts = PageOptions {
            max_concurrent_pages: Some(2),
            include_last_page: true,
        };

        let fetch = {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            move |page: u32| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, SdkError>(Page {
                        items: vec![page],
                        number_of_pages: 10,
                    })
                }
            }
        };

        let mut items = collect_pages(fetch, &opts).await.unwrap();
        items.sort_unstable();
        assert_eq!(items, (1..=10).collect::<Vec<_>>());
        // Page 1 runs alone before the workers start.
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_oversized_bound_is_clamped() {
        let opts = PageOptions {
            max_concurrent_pages: Some(usize::MAX),
            include_last_page: true,
        };
        let calls = Arc::new(Mutex::new(Vec::new()));
        let items = collect_pages(listing(4, calls.clone(), HashSet::new()), &opts)
            .await
            .unwrap();
        assert_eq!(items.len(), 1 + 2 + 3 + 4);
        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_zero_bound_still_makes_progress() {
        let opts = PageOptions {
            max_concurrent_pages: Some(0),
            include_last_page: false,
        };
        let calls = Arc::new(Mutex::new(Vec::new()));
        let items = collect_pages(listing(4, calls, HashSet::new()), &opts)
            .await
            .unwrap();
        assert_eq!(items.len(), 1 + 2 + 3);
    }
}

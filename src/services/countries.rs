use crate::clients::CountrySource;
use crate::models::country::Country;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

/// How long a failed fetch is remembered before the dataset is requested again.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Process-wide cache in front of the country dataset.
///
/// The dataset is fetched once and kept for the life of the process. Concurrent
/// callers share a single in-flight fetch. A failed or empty fetch is served as
/// an empty list, and further calls get the empty list straight away until
/// `retry_after` has passed.
pub struct CountryCatalog {
    source: Arc<dyn CountrySource>,
    cache: OnceCell<Arc<Vec<Country>>>,
    /// Time of the last failed fetch. Held while a fetch is in flight.
    last_failure: Mutex<Option<Instant>>,
    retry_after: Duration,
}

impl CountryCatalog {
    #[must_use]
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
            last_failure: Mutex::new(None),
            retry_after: DEFAULT_RETRY_AFTER,
        }
    }

    #[must_use]
    pub const fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = retry_after;
        self
    }

    pub async fn countries(&self) -> Arc<Vec<Country>> {
        if let Some(cached) = self.cache.get() {
            return cached.clone();
        }

        let mut last_failure = self.last_failure.lock().await;
        // the fetch we queued behind may have filled the cache
        if let Some(cached) = self.cache.get() {
            return cached.clone();
        }
        if let Some(failed_at) = *last_failure
            && failed_at.elapsed() < self.retry_after
        {
            debug!("Country dataset unavailable, serving empty list");
            return Arc::new(Vec::new());
        }

        match self.source.fetch_countries().await {
            Ok(countries) if !countries.is_empty() => {
                info!("Cached {} countries", countries.len());
                let countries = Arc::new(countries);
                let _ = self.cache.set(countries.clone());
                *last_failure = None;
                countries
            }
            Ok(_) => {
                debug!("Country dataset came back empty");
                *last_failure = Some(Instant::now());
                Arc::new(Vec::new())
            }
            Err(e) => {
                warn!("Failed to fetch country dataset: {}", e);
                *last_failure = Some(Instant::now());
                Arc::new(Vec::new())
            }
        }
    }

    /// Looks a country up by its common name.
    pub async fn find(&self, common_name: &str) -> Option<Country> {
        self.countries()
            .await
            .iter()
            .find(|c| c.name.common == common_name)
            .cloned()
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl CountingSource {
        fn new(fail: bool, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
                delay,
            })
        }
    }

    #[async_trait::async_trait]
    impl CountrySource for CountingSource {
        async fn fetch_countries(&self) -> anyhow::Result<Vec<Country>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                anyhow::bail!("connection refused");
            }
            let mut country = Country::default();
            country.name.common = "Japan".to_string();
            country.capital = vec!["Tokyo".to_string()];
            Ok(vec![country])
        }
    }

    #[tokio::test]
    async fn dataset_is_fetched_once() {
        let source = CountingSource::new(false, Duration::ZERO);
        let catalog = CountryCatalog::new(source.clone());

        assert_eq!(catalog.countries().await.len(), 1);
        assert_eq!(catalog.countries().await.len(), 1);
        assert!(catalog.find("Japan").await.is_some());
        assert!(catalog.find("Narnia").await.is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(catalog.is_cached());
    }

    #[tokio::test]
    async fn failure_degrades_to_empty_and_is_retried_later() {
        let source = CountingSource::new(true, Duration::ZERO);
        let catalog = CountryCatalog::new(source.clone()).with_retry_after(Duration::ZERO);

        assert!(catalog.countries().await.is_empty());
        assert!(catalog.countries().await.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(!catalog.is_cached());
    }

    #[tokio::test]
    async fn recent_failure_is_not_retried_immediately() {
        let source = CountingSource::new(true, Duration::ZERO);
        let catalog = CountryCatalog::new(source.clone());

        assert!(catalog.countries().await.is_empty());
        assert!(catalog.countries().await.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_slow_failing_fetch() {
        let delay = Duration::from_millis(300);
        let source = CountingSource::new(true, delay);
        let catalog = Arc::new(CountryCatalog::new(source.clone()));

        let started = Instant::now();
        let callers = (0..5).map(|_| {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.countries().await })
        });
        let cache_check = {
            let catalog = catalog.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let asked = Instant::now();
                let cached = catalog.is_cached();
                (cached, asked.elapsed())
            })
        };

        for result in futures::future::join_all(callers).await {
            assert!(result.unwrap().is_empty());
        }
        let elapsed = started.elapsed();
        let (cached, waited) = cache_check.await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(elapsed < delay * 3, "callers were serialized: {elapsed:?}");
        assert!(!cached);
        assert!(waited < Duration::from_millis(50), "is_cached blocked: {waited:?}");
    }
}

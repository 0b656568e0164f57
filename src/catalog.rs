use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::database_ops::MovieStore;
use crate::model::Catalog;
use crate::util::env as env_util;

struct Cached {
    loaded_at: Instant,
    catalog: Arc<Catalog>,
}

/// Fetches and normalizes the movie table. Without a TTL every call re-reads
/// the store; with one, a snapshot is reused until it expires.
pub struct CatalogService {
    store: Arc<dyn MovieStore>,
    ttl: Option<Duration>,
    cache: RwLock<Option<Cached>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MovieStore>, ttl: Option<Duration>) -> Self {
        Self {
            store,
            ttl: ttl.filter(|t| !t.is_zero()),
            cache: RwLock::new(None),
        }
    }

    /// TTL from `CATALOG_CACHE_TTL_SECS` (0 or unset disables caching).
    pub fn from_env(store: Arc<dyn MovieStore>) -> Self {
        let secs: u64 = env_util::env_parse("CATALOG_CACHE_TTL_SECS", 0u64);
        Self::new(store, Some(Duration::from_secs(secs)))
    }

    pub fn store(&self) -> &dyn MovieStore {
        self.store.as_ref()
    }

    pub async fn snapshot(&self) -> Result<Arc<Catalog>> {
        if let Some(ttl) = self.ttl {
            if let Some(cached) = self.cache.read().await.as_ref() {
                if cached.loaded_at.elapsed() < ttl {
                    debug!("serving cached catalog");
                    return Ok(Arc::clone(&cached.catalog));
                }
            }
        }

        let docs = self.store.fetch_all().await?;
        let catalog = Arc::new(Catalog::from_documents(&docs));

        if self.ttl.is_some() {
            *self.cache.write().await = Some(Cached {
                loaded_at: Instant::now(),
                catalog: Arc::clone(&catalog),
            });
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::movie;
    use crate::model::Document;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        docs: Vec<Document>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieStore for CountingStore {
        fn describe(&self) -> String {
            "counting".into()
        }

        async fn fetch_all(&self) -> Result<Vec<Document>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.docs.clone())
        }

        async fn ping(&self) -> bool {
            true
        }
    }

    fn store() -> Arc<CountingStore> {
        Arc::new(CountingStore {
            docs: vec![movie("Heat", 1995, 30.0, &["Crime"])],
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn refetches_every_time_without_ttl() {
        let store = store();
        let service = CatalogService::new(store.clone(), None);
        service.snapshot().await.unwrap();
        service.snapshot().await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let store = store();
        let service = CatalogService::new(store.clone(), Some(Duration::ZERO));
        service.snapshot().await.unwrap();
        service.snapshot().await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reuses_snapshot_until_ttl_expires() {
        let store = store();
        let service = CatalogService::new(store.clone(), Some(Duration::from_secs(60)));

        let first = service.snapshot().await.unwrap();
        let second = service.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        service.snapshot().await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }
}

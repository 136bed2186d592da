// Cache-aside retrieval of remote binary assets.
// Fetches a URL once over the network, then serves every later request locally.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;

use crate::api::ApiClient;
use crate::api::client::check_response;
use crate::error::{HauskitError, Result};

use super::store::{Blob, BlobStore};

/// Network fetch capability supplied by the hosting environment.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the resource at `url`, returning its bytes and content type.
    async fn fetch(&self, url: &str) -> Result<Blob>;
}

#[async_trait]
impl Fetcher for ApiClient {
    async fn fetch(&self, url: &str) -> Result<Blob> {
        let response = self.http().get(url).send().await.map_err(HauskitError::Http)?;
        let response = check_response(response)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await.map_err(HauskitError::Http)?.to_vec();
        Ok(Blob {
            bytes,
            content_type,
        })
    }
}

/// Cache-aside client over a [`BlobStore`]: look up first, fetch and populate
/// on miss.
pub struct CacheClient<F> {
    store: BlobStore,
    fetcher: F,
}

impl<F: Fetcher> CacheClient<F> {
    pub fn new(store: BlobStore, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Get the blob for `url`, fetching and storing it first if not cached.
    ///
    /// The store lookup strictly precedes any network access; a storage
    /// failure propagates rather than falling back to a fetch, so absence and
    /// malfunction stay distinct. A failed store write after a successful
    /// fetch also propagates. There is no de-duplication of concurrent
    /// retrievals for the same key: both will fetch and both will write, and
    /// the last write wins.
    pub async fn retrieve(&self, url: &str) -> Result<Blob> {
        self.store.open().await?;

        if let Some(blob) = self.store.get(url).await? {
            tracing::debug!(url, "blob cache hit");
            return Ok(blob);
        }

        tracing::debug!(url, "blob cache miss, fetching");
        let blob = self.fetcher.fetch(url).await?;
        self.store.put(url, &blob, Utc::now()).await?;
        Ok(blob)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &BlobStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;
    use tokio::sync::Barrier;

    use crate::cache::store::hex_digest;

    /// Fetcher returning canned bytes and counting calls.
    struct MockFetcher {
        bytes: Vec<u8>,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, _url: &str) -> Result<Blob> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Blob {
                bytes: self.bytes.clone(),
                content_type: "model/gltf-binary".to_string(),
            })
        }
    }

    /// Fetcher that blocks until two calls have arrived, then returns a
    /// payload unique to each call.
    struct BarrierFetcher {
        barrier: Barrier,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for BarrierFetcher {
        async fn fetch(&self, _url: &str) -> Result<Blob> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.barrier.wait().await;
            Ok(Blob {
                bytes: format!("payload-{}", n).into_bytes(),
                content_type: "model/gltf-binary".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_second_retrieve_is_served_from_store() {
        let temp_dir = TempDir::new().unwrap();
        let client = CacheClient::new(
            BlobStore::new(temp_dir.path()),
            MockFetcher::new(b"glb bytes"),
        );

        let first = client.retrieve("https://x/model.glb").await.unwrap();
        let second = client.retrieve("https://x/model.glb").await.unwrap();

        assert_eq!(first.bytes, b"glb bytes");
        assert_eq!(second, first);
        assert_eq!(client.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_miss_populates_store() {
        let temp_dir = TempDir::new().unwrap();
        let client = CacheClient::new(BlobStore::new(temp_dir.path()), MockFetcher::new(b"B"));

        let blob = client.retrieve("https://x/model.glb").await.unwrap();
        assert_eq!(blob.bytes, b"B");

        let stored = client
            .store()
            .get("https://x/model.glb")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.bytes, b"B");
    }

    #[tokio::test]
    async fn test_concurrent_cold_retrieves_both_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let client = Arc::new(CacheClient::new(
            BlobStore::new(temp_dir.path()),
            BarrierFetcher {
                barrier: Barrier::new(2),
                calls: AtomicUsize::new(0),
            },
        ));

        // Neither fetch returns until both have started, so neither call can
        // be served from the store: both must miss and both must write.
        let url = "https://x/model.glb";
        let (a, b) = tokio::join!(client.retrieve(url), client.retrieve(url));
        let a = a.unwrap();
        let b = b.unwrap();

        assert_eq!(client.fetcher.calls.load(Ordering::SeqCst), 2);
        assert!(a.bytes.starts_with(b"payload-"));
        assert!(b.bytes.starts_with(b"payload-"));

        // Last write wins: the store holds one of the two fetched payloads.
        let stored = client.store().get(url).await.unwrap().unwrap();
        assert!(stored.bytes == a.bytes || stored.bytes == b.bytes);
    }

    #[tokio::test]
    async fn test_open_failure_propagates_without_fetching() {
        let temp_dir = TempDir::new().unwrap();
        let occupied = temp_dir.path().join("not-a-dir");
        std::fs::write(&occupied, b"occupied").unwrap();

        let client = CacheClient::new(BlobStore::new(&occupied), MockFetcher::new(b"B"));

        let err = client.retrieve("https://x/model.glb").await.unwrap_err();
        assert!(matches!(err, HauskitError::Io(_)));
        assert_eq!(client.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_error_does_not_fall_back_to_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlobStore::new(temp_dir.path());
        store.open().await.unwrap();

        // A directory where the entry record should be makes the lookup fail
        // with something other than "not found".
        let url = "https://x/model.glb";
        std::fs::create_dir_all(store.entry_path(url)).unwrap();

        let client = CacheClient::new(BlobStore::new(temp_dir.path()), MockFetcher::new(b"B"));
        let err = client.retrieve(url).await.unwrap_err();
        assert!(matches!(err, HauskitError::Io(_)));
        assert_eq!(client.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_put_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlobStore::new(temp_dir.path());
        store.open().await.unwrap();

        // Occupy the payload temp path with a directory so the store write
        // fails after the fetch has succeeded.
        let blob_temp = temp_dir
            .path()
            .join("blobs")
            .join(format!("{}.tmp", hex_digest(b"B")));
        std::fs::create_dir_all(&blob_temp).unwrap();

        let client = CacheClient::new(BlobStore::new(temp_dir.path()), MockFetcher::new(b"B"));
        let err = client.retrieve("https://x/model.glb").await.unwrap_err();
        assert!(matches!(err, HauskitError::Io(_)));
        assert_eq!(client.fetcher.calls.load(Ordering::SeqCst), 1);
    }
}

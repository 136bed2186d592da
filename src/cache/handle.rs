// Reactive handle over the blob cache.
// A single-slot cell that publishes a shared blob reference once it is available.

use std::sync::Arc;

use tokio::sync::watch;

use super::client::{CacheClient, Fetcher};
use super::store::Blob;

/// A push-style cell for one cached blob.
///
/// Starts pending with no value and transitions at most once to resolved,
/// carrying a shared reference to the payload. If retrieval fails the handle
/// stays pending forever; subscribers see no error, only the absence of a
/// value.
#[derive(Clone)]
pub struct BlobHandle {
    tx: Arc<watch::Sender<Option<Arc<Blob>>>>,
}

impl BlobHandle {
    /// Open a handle for `url` and begin resolving it in the background.
    pub fn open<F>(client: Arc<CacheClient<F>>, url: impl Into<String>) -> Self
    where
        F: Fetcher + 'static,
    {
        let url = url.into();
        let (tx, _rx) = watch::channel(None);
        let tx = Arc::new(tx);

        let publisher = Arc::clone(&tx);
        tokio::spawn(async move {
            match client.retrieve(&url).await {
                Ok(blob) => {
                    // send_replace stores the value even when no subscriber
                    // is listening yet; late subscribers still observe it.
                    publisher.send_replace(Some(Arc::new(blob)));
                }
                Err(err) => {
                    // The cell is left untouched: consumers only ever observe
                    // "not resolved yet".
                    tracing::warn!(url = %url, error = %err, "blob handle resolution failed");
                }
            }
        });

        Self { tx }
    }

    /// Current value of the cell: `None` while pending.
    pub fn current(&self) -> Option<Arc<Blob>> {
        self.tx.borrow().clone()
    }

    /// Whether the handle has resolved.
    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Subscribe to the cell. A receiver taken after resolution observes the
    /// resolved value immediately; one taken before observes the transition.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Blob>>> {
        self.tx.subscribe()
    }

    /// Wait until the handle resolves and return the blob reference.
    /// Never completes if retrieval failed.
    pub async fn resolved(&self) -> Arc<Blob> {
        let mut rx = self.subscribe();
        loop {
            if let Some(blob) = rx.borrow_and_update().as_ref() {
                return Arc::clone(blob);
            }
            if rx.changed().await.is_err() {
                // The handle holds the sender, so this is unreachable while
                // the handle is alive; treat it like a failed resolution.
                std::future::pending::<()>().await;
            }
        }
    }
}

impl<F: Fetcher + 'static> CacheClient<F> {
    /// Open a reactive handle that resolves once the blob for `url` is
    /// available locally.
    pub fn open_handle(self: Arc<Self>, url: impl Into<String>) -> BlobHandle {
        BlobHandle::open(self, url)
    }
}

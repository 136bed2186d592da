// Local blob cache module.
// Memoizes network fetches of binary assets in a persistent store, keyed by URL.

pub mod client;
pub mod handle;
pub mod store;

pub use client::{CacheClient, Fetcher};
pub use handle::BlobHandle;
pub use store::{Blob, BlobStore};

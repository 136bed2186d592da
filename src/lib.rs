// hauskit: client library for the floor-plan editing service.
// Typed REST endpoints, page loaders, and a persistent blob cache for 3D models.

pub mod api;
pub mod cache;
pub mod error;
pub mod pages;

pub use api::ApiClient;
pub use cache::{Blob, BlobHandle, BlobStore, CacheClient, Fetcher};
pub use error::{HauskitError, Result};

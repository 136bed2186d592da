// Persistent blob store for fetched binary assets.
// Maps a URL key to payload bytes plus insertion metadata, surviving restarts.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{HauskitError, Result};

/// A binary payload with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// On-disk record for one cached URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    url: String,
    content_type: String,
    stored_at: DateTime<Utc>,
    /// Hex digest naming the payload file under blobs/.
    blob: String,
    size: u64,
}

/// Durable key-value store for binary payloads, keyed by URL.
///
/// Entry records live under files/ and are replaced atomically; payload bytes
/// live under blobs/, content-addressed and write-once. A record is the commit
/// point for its key: because payload files are immutable, a reader holding an
/// old record still reads the old payload, so a get racing a put observes the
/// old or the new entry in full.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store rooted at the given directory. No I/O happens until
    /// `open` is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store at the default per-user cache location.
    pub fn at_default_root() -> Result<Self> {
        let root = Self::default_root()
            .ok_or_else(|| HauskitError::Other("no home directory for cache root".to_string()))?;
        Ok(Self::new(root))
    }

    /// Default store root (~/.cache/hauskit on macOS/Linux).
    pub fn default_root() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hauskit").map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Idempotently ensure the storage structure exists. Safe to call
    /// repeatedly and concurrently.
    pub async fn open(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.files_dir()).await?;
        tokio::fs::create_dir_all(self.blobs_dir()).await?;
        Ok(())
    }

    /// Look up the payload stored under `key`. Returns `Ok(None)` when the key
    /// is absent; storage failures surface as errors.
    pub async fn get(&self, key: &str) -> Result<Option<Blob>> {
        let contents = match tokio::fs::read(self.entry_path(key)).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: EntryRecord = serde_json::from_slice(&contents)?;
        // A record always points at an immutable payload file; a missing one
        // means the store was tampered with, which is a storage error.
        let bytes = tokio::fs::read(self.blobs_dir().join(&record.blob)).await?;
        Ok(Some(Blob {
            bytes,
            content_type: record.content_type,
        }))
    }

    /// Upsert the entry under `key`, replacing any prior payload and
    /// timestamp. Atomic per key: the entry record is swapped in a single
    /// rename.
    pub async fn put(&self, key: &str, blob: &Blob, stored_at: DateTime<Utc>) -> Result<()> {
        let digest = hex_digest(&blob.bytes);

        let blob_path = self.blobs_dir().join(&digest);
        if !tokio::fs::try_exists(&blob_path).await? {
            replace_file(&blob_path, &blob.bytes).await?;
        }

        let record = EntryRecord {
            url: key.to_string(),
            content_type: blob.content_type.clone(),
            stored_at,
            blob: digest,
            size: blob.bytes.len() as u64,
        };
        let json = serde_json::to_vec_pretty(&record)?;
        replace_file(&self.entry_path(key), &json).await?;
        Ok(())
    }

    fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    fn blobs_dir(&self) -> PathBuf {
        self.root.join("blobs")
    }

    /// Path of the entry record for `key`.
    pub(crate) fn entry_path(&self, key: &str) -> PathBuf {
        self.files_dir()
            .join(format!("{}.json", hex_digest(key.as_bytes())))
    }
}

/// Hex SHA-256 digest used for entry and payload file names.
pub(crate) fn hex_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Write atomically via temp file and rename.
async fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, contents).await?;
    match tokio::fs::rename(&temp_path, path).await {
        Ok(()) => Ok(()),
        // A concurrent writer using the same temp path can steal the rename;
        // the destination then already holds a complete value.
        Err(err) if err.kind() == io::ErrorKind::NotFound && path.exists() => Ok(()),
        Err(err) => Err(err),
    }
}

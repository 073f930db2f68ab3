//! In-process object storage.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{ObjectStorage, ObjectStorageError};
use crate::domain::{ImageUpload, ImageUrl};

use super::{join_url, key_from_url, new_blob_key};

/// Keeps blobs in memory, keyed by the URL path segment it issued.
///
/// Deletes can be forced to fail to exercise the caller's consistency rules.
#[derive(Debug, Default)]
pub struct InMemoryObjectStorage {
    public_base_url: String,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_deletes: AtomicBool,
    failing_urls: Mutex<HashSet<String>>,
}

impl InMemoryObjectStorage {
    /// Create an empty store issuing URLs under `public_base_url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use invitation_backend::outbound::storage::InMemoryObjectStorage;
    ///
    /// let storage = InMemoryObjectStorage::new("/images");
    /// assert!(storage.is_empty());
    /// ```
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            ..Self::default()
        }
    }

    /// Make every subsequent delete fail with an I/O error, or stop doing so.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make deletes of `url` alone fail with an I/O error.
    pub fn fail_deletes_of(&self, url: &ImageUrl) {
        self.failing_urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.as_str().to_owned());
    }

    fn delete_rejected(&self, url: &ImageUrl) -> bool {
        self.fail_deletes.load(Ordering::SeqCst)
            || self
                .failing_urls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(url.as_str())
    }

    /// Whether the blob behind `url` is still retrievable.
    pub fn contains(&self, url: &ImageUrl) -> bool {
        key_from_url(&self.public_base_url, url.as_str())
            .is_some_and(|key| self.blobs().contains_key(key))
    }

    /// Bytes stored behind `url`, if any.
    pub fn get(&self, url: &ImageUrl) -> Option<Vec<u8>> {
        let key = key_from_url(&self.public_base_url, url.as_str())?;
        self.blobs().get(key).cloned()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs().len()
    }

    /// Whether no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs().is_empty()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, upload: &ImageUpload) -> Result<ImageUrl, ObjectStorageError> {
        let key = new_blob_key(upload.file_extension());
        let url = join_url(&self.public_base_url, &key);
        self.blobs().insert(key, upload.bytes().to_vec());
        Ok(ImageUrl::new(url))
    }

    async fn delete(&self, url: &ImageUrl) -> Result<(), ObjectStorageError> {
        if self.delete_rejected(url) {
            return Err(ObjectStorageError::io("delete rejected by storage"));
        }
        let key = key_from_url(&self.public_base_url, url.as_str())
            .ok_or_else(|| ObjectStorageError::foreign_url(url.as_str()))?;
        self.blobs()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| ObjectStorageError::missing(url.as_str()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-process store.
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload::new(vec![9, 9], Some("image/jpeg".into())).expect("upload")
    }

    #[tokio::test]
    async fn upload_then_delete_round_trips() {
        let storage = InMemoryObjectStorage::new("/images");
        let url = storage.upload(&upload()).await.expect("upload");
        assert!(url.as_str().starts_with("/images/"));
        assert_eq!(storage.get(&url), Some(vec![9, 9]));

        storage.delete(&url).await.expect("delete");
        assert!(!storage.contains(&url));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn forced_delete_failures_keep_blob() {
        let storage = InMemoryObjectStorage::new("/images");
        let url = storage.upload(&upload()).await.expect("upload");
        storage.fail_deletes(true);

        let error = storage.delete(&url).await.expect_err("forced failure");

        assert!(matches!(error, ObjectStorageError::Io { .. }));
        assert!(storage.contains(&url));
    }

    #[tokio::test]
    async fn targeted_delete_failures_spare_other_blobs() {
        let storage = InMemoryObjectStorage::new("/images");
        let kept = storage.upload(&upload()).await.expect("upload");
        let other = storage.upload(&upload()).await.expect("upload");
        storage.fail_deletes_of(&kept);

        storage.delete(&kept).await.expect_err("targeted failure");
        storage.delete(&other).await.expect("other blob deletes");

        assert!(storage.contains(&kept));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn missing_and_foreign_urls_are_distinguished() {
        let storage = InMemoryObjectStorage::new("/images");

        let missing = storage
            .delete(&ImageUrl::new("/images/gone.png"))
            .await
            .expect_err("nothing stored");
        let foreign = storage
            .delete(&ImageUrl::new("https://old-cdn/gone.png"))
            .await
            .expect_err("not issued here");

        assert!(matches!(missing, ObjectStorageError::Missing { .. }));
        assert!(matches!(foreign, ObjectStorageError::ForeignUrl { .. }));
    }
}

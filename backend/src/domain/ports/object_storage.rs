//! Port abstraction for the object storage gateway holding image blobs.

use async_trait::async_trait;

use crate::domain::{ImageUpload, ImageUrl};

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ObjectStorageError {
        /// Reading or writing the backing store failed.
        Io { message: String } => "object storage I/O failed: {message}",
        /// The URL is under this store's prefix but no blob exists behind it.
        Missing { url: String } => "object storage holds no blob at {url}",
        /// The URL was not issued by this store.
        ForeignUrl { url: String } => "object storage did not issue {url}",
    }
}

/// Port for storing and deleting image blobs.
///
/// Neither operation retries; failures propagate to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `upload` and return a URL it can be fetched from.
    async fn upload(&self, upload: &ImageUpload) -> Result<ImageUrl, ObjectStorageError>;

    /// Delete the blob behind `url`.
    async fn delete(&self, url: &ImageUrl) -> Result<(), ObjectStorageError>;
}

//! Filesystem-backed object storage built on `cap-std`.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{ObjectStorage, ObjectStorageError};
use crate::domain::{ImageUpload, ImageUrl};

use super::{join_url, key_from_url, new_blob_key};

/// Stores blobs as flat files under one root directory.
///
/// All file access goes through a `cap_std` directory handle, so keys can
/// never reach outside the root.
#[derive(Clone)]
pub struct FilesystemObjectStorage {
    root: Arc<Dir>,
    public_base_url: String,
}

impl FilesystemObjectStorage {
    /// Open (creating if needed) `root` and issue URLs under `public_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use invitation_backend::outbound::storage::FilesystemObjectStorage;
    ///
    /// let storage = FilesystemObjectStorage::open("./storage", "/images")?;
    /// # let _ = storage;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn open(root: impl AsRef<Path>, public_base_url: impl Into<String>) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root.as_ref(), ambient_authority())?;
        let dir = Dir::open_ambient_dir(root.as_ref(), ambient_authority())?;
        Ok(Self {
            root: Arc::new(dir),
            public_base_url: public_base_url.into(),
        })
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, ObjectStorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, ObjectStorageError> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || task(&root))
            .await
            .map_err(|err| ObjectStorageError::io(format!("storage task failed: {err}")))?
    }
}

#[async_trait]
impl ObjectStorage for FilesystemObjectStorage {
    async fn upload(&self, upload: &ImageUpload) -> Result<ImageUrl, ObjectStorageError> {
        let key = new_blob_key(upload.file_extension());
        let bytes = upload.bytes().to_vec();
        let file_name = key.clone();
        self.blocking(move |root| {
            root.write(Path::new(&file_name), &bytes)
                .map_err(|err| ObjectStorageError::io(err.to_string()))
        })
        .await?;

        debug!(key = %key, "stored blob on filesystem");
        Ok(ImageUrl::new(join_url(&self.public_base_url, &key)))
    }

    async fn delete(&self, url: &ImageUrl) -> Result<(), ObjectStorageError> {
        let key = key_from_url(&self.public_base_url, url.as_str())
            .ok_or_else(|| ObjectStorageError::foreign_url(url.as_str()))?
            .to_owned();
        let missing_url = url.as_str().to_owned();
        self.blocking(move |root| match root.remove_file(Path::new(&key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ObjectStorageError::missing(missing_url))
            }
            Err(err) => Err(ObjectStorageError::io(err.to_string())),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Filesystem round-trips in a temporary directory.
    use super::*;

    fn storage() -> (tempfile::TempDir, FilesystemObjectStorage) {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = FilesystemObjectStorage::open(dir.path(), "/images").expect("open storage");
        (dir, storage)
    }

    fn upload() -> ImageUpload {
        ImageUpload::new(b"png-bytes".to_vec(), Some("image/png".into())).expect("upload")
    }

    #[tokio::test]
    async fn upload_writes_file_under_root() {
        let (dir, storage) = storage();

        let url = storage.upload(&upload()).await.expect("upload succeeds");

        let key = url
            .as_str()
            .strip_prefix("/images/")
            .expect("url under public prefix");
        assert!(key.ends_with(".png"));
        let root = Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open root");
        assert_eq!(root.read(key).expect("blob readable"), b"png-bytes");
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let (_dir, storage) = storage();
        let url = storage.upload(&upload()).await.expect("upload succeeds");

        storage.delete(&url).await.expect("delete succeeds");

        let error = storage.delete(&url).await.expect_err("already deleted");
        assert!(matches!(error, ObjectStorageError::Missing { .. }));
    }

    #[tokio::test]
    async fn delete_rejects_foreign_urls() {
        let (_dir, storage) = storage();
        let error = storage
            .delete(&ImageUrl::new("https://elsewhere/a.png"))
            .await
            .expect_err("foreign url");
        assert!(matches!(error, ObjectStorageError::ForeignUrl { .. }));
    }
}

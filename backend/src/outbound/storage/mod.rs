//! Object storage adapters for invitation image blobs.
//!
//! - [`FilesystemObjectStorage`] writes blobs under a capability-scoped
//!   directory and hands out URLs under a configurable public prefix.
//! - [`InMemoryObjectStorage`] keeps blobs in process for development and
//!   tests.

mod filesystem;
mod memory;

pub use filesystem::FilesystemObjectStorage;
pub use memory::InMemoryObjectStorage;

/// Join a public base URL and a blob key with exactly one separator.
fn join_url(base: &str, key: &str) -> String {
    format!("{}/{key}", base.trim_end_matches('/'))
}

/// Recover the blob key from a URL issued under `base`.
///
/// Returns `None` for URLs outside the prefix and for keys that would escape
/// a flat namespace.
fn key_from_url<'a>(base: &str, url: &'a str) -> Option<&'a str> {
    let prefix = base.trim_end_matches('/');
    let key = url.strip_prefix(prefix)?.strip_prefix('/')?;
    let flat = !key.is_empty() && !key.contains('/') && !key.contains('\\') && key != "..";
    flat.then_some(key)
}

/// Fresh blob key carrying the upload's file extension.
fn new_blob_key(extension: &str) -> String {
    format!("{}.{extension}", uuid::Uuid::new_v4().simple())
}

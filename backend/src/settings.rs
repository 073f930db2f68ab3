//! Application configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `INVITATION_*` environment variables over an
//! optional configuration file. The pool size carries a concrete default so an
//! empty merge still loads; the remaining fields are optional and their
//! accessors apply the documented defaults.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_HASH_SALT;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORAGE_ROOT: &str = "./storage";
const DEFAULT_STORAGE_PUBLIC_BASE_URL: &str = "/images";

/// Runtime configuration for the invitation server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVITATION")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string; the in-process store is used when unset.
    pub database_url: Option<String>,
    /// Directory holding uploaded image blobs.
    pub storage_root: Option<PathBuf>,
    /// Public URL prefix under which `storage_root` is served.
    pub storage_public_base_url: Option<String>,
    /// Salt keying share-code derivation.
    pub hash_salt: Option<String>,
    /// JSON template catalogue inserted at startup.
    pub templates_path: Option<PathBuf>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Database URL, if persistence is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Blob directory, falling back to `./storage`.
    pub fn storage_root(&self) -> &Path {
        self.storage_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORAGE_ROOT))
    }

    /// Public blob URL prefix, falling back to `/images`.
    pub fn storage_public_base_url(&self) -> &str {
        self.storage_public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_PUBLIC_BASE_URL)
    }

    /// Share-code salt, falling back to the built-in salt.
    pub fn hash_salt(&self) -> &str {
        self.hash_salt.as_deref().unwrap_or(DEFAULT_HASH_SALT)
    }

    /// Template catalogue file, if startup seeding is requested.
    pub fn templates_path(&self) -> Option<&Path> {
        self.templates_path.as_deref()
    }

    /// Pool size, 10 unless configured.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}

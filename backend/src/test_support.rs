//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend avoids direct `std::fs` calls. These helpers wrap
    //! `cap_std::fs::Dir` so test suites share consistent file access.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use invitation_backend::test_support::cap_fs::{path_exists, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.json");
    /// write_file(&path, b"[]")?;
    /// assert!(path_exists(&path));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod harness {
    //! Services wired over the in-process adapters.

    use std::sync::Arc;

    use crate::domain::{
        FeistelHashAssigner, InvitationPorts, InvitationService, Template, TemplateCatalogueService,
        TemplateId, UserProvisioningService,
    };
    use crate::inbound::http::state::{HttpState, HttpStatePorts};
    use crate::outbound::memory::InMemoryStore;
    use crate::outbound::storage::InMemoryObjectStorage;

    /// Salt used by every harness so share codes are reproducible.
    pub const HARNESS_SALT: &str = "harness-salt";

    /// Public URL prefix of the harness object storage.
    pub const HARNESS_STORAGE_URL: &str = "https://blobs.test";

    /// Real services over an [`InMemoryStore`] and [`InMemoryObjectStorage`].
    pub struct InvitationHarness {
        pub store: Arc<InMemoryStore>,
        pub storage: Arc<InMemoryObjectStorage>,
        pub assigner: FeistelHashAssigner,
        pub provisioning: Arc<UserProvisioningService<InMemoryStore, InMemoryStore>>,
        pub invitations: Arc<InvitationService>,
        pub templates: Arc<TemplateCatalogueService<InMemoryStore>>,
    }

    impl InvitationHarness {
        /// Wire services over a store seeded with `templates`.
        pub fn new(templates: Vec<Template>) -> Self {
            let store = Arc::new(InMemoryStore::with_templates(templates));
            let storage = Arc::new(InMemoryObjectStorage::new(HARNESS_STORAGE_URL));
            let assigner = FeistelHashAssigner::new(HARNESS_SALT);
            let provisioning = Arc::new(UserProvisioningService::new(
                store.clone(),
                store.clone(),
                Arc::new(assigner.clone()),
            ));
            let invitations = Arc::new(InvitationService::new(InvitationPorts {
                users: store.clone(),
                templates: store.clone(),
                invitations: store.clone(),
                images: store.clone(),
                storage: storage.clone(),
            }));
            let templates = Arc::new(TemplateCatalogueService::new(store.clone()));
            Self {
                store,
                storage,
                assigner,
                provisioning,
                invitations,
                templates,
            }
        }

        /// Harness seeded with templates `1..=count`.
        pub fn with_catalogue(count: i64) -> Self {
            Self::new(
                (1..=count)
                    .map(|id| {
                        Template::new(
                            TemplateId::new(id),
                            format!("https://cdn.test/templates/{id}.png"),
                            format!("template {id}"),
                        )
                    })
                    .collect(),
            )
        }

        /// Handler state backed by the harness services.
        pub fn http_state(&self) -> HttpState {
            HttpState::new(HttpStatePorts {
                provisioning: self.provisioning.clone(),
                templates: self.templates.clone(),
                invitations: self.invitations.clone(),
                invitations_query: self.invitations.clone(),
            })
        }
    }
}

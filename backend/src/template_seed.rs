//! Startup seeding of the template catalogue.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::Template;
use crate::domain::ports::{
    TemplateCatalogueSeedError, TemplateCatalogueSeeder, TemplateSeedSummary,
};

/// Errors returned while seeding templates at startup.
#[derive(Debug, Error)]
pub enum TemplateSeedingError {
    /// Catalogue file could not be read.
    #[error("failed to read template catalogue at {path}: {source}")]
    Read {
        /// Path to the catalogue file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Catalogue file is not a JSON array of templates.
    #[error("failed to parse template catalogue at {path}: {source}")]
    Parse {
        /// Path to the catalogue file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Persisting the catalogue failed.
    #[error("template seeding failed: {0}")]
    Seeding(#[from] TemplateCatalogueSeedError),
}

/// Insert the templates listed in `path` that are not yet catalogued.
///
/// Returns `None` without touching storage when no path is configured.
///
/// # Examples
///
/// ```rust,no_run
/// use invitation_backend::outbound::memory::InMemoryStore;
/// use invitation_backend::template_seed::seed_templates_on_startup;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryStore::new();
/// let summary = seed_templates_on_startup(None, &store).await?;
/// assert!(summary.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_templates_on_startup(
    path: Option<&Path>,
    seeder: &dyn TemplateCatalogueSeeder,
) -> Result<Option<TemplateSeedSummary>, TemplateSeedingError> {
    let Some(path) = path else {
        info!(reason = "not configured", "template seeding skipped");
        return Ok(None);
    };

    let templates = load_catalogue(path)?;
    let summary = seeder.seed(&templates).await?;
    info!(
        path = %path.display(),
        inserted = summary.inserted,
        skipped = summary.skipped,
        "template catalogue seeded"
    );
    Ok(Some(summary))
}

/// Read and parse a JSON template catalogue.
///
/// # Errors
///
/// Returns [`TemplateSeedingError::Read`] when the file cannot be opened and
/// [`TemplateSeedingError::Parse`] when its contents are not a template array.
pub fn load_catalogue(path: &Path) -> Result<Vec<Template>, TemplateSeedingError> {
    let read_error = |source| TemplateSeedingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "template catalogue path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| TemplateSeedingError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalogue loading and seeding.

    use super::*;
    use crate::domain::TemplateId;
    use crate::domain::ports::MockTemplateCatalogueSeeder;
    use crate::test_support::cap_fs::write_file;
    use rstest::rstest;

    const CATALOGUE: &str = r#"[
        {"id": 1, "backgroundImageUrl": "https://cdn/party.png", "typeDescription": "party"},
        {"id": 2, "backgroundImageUrl": "https://cdn/wedding.png", "typeDescription": "wedding"}
    ]"#;

    fn write_catalogue(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("templates.json");
        write_file(&path, contents.as_bytes()).expect("write catalogue");
        (dir, path)
    }

    #[rstest]
    fn parses_camel_case_catalogue() {
        let (_dir, path) = write_catalogue(CATALOGUE);
        let templates = load_catalogue(&path).expect("catalogue parses");
        assert_eq!(
            templates,
            vec![
                Template::new(TemplateId::new(1), "https://cdn/party.png", "party"),
                Template::new(TemplateId::new(2), "https://cdn/wedding.png", "wedding"),
            ]
        );
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_catalogue(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, TemplateSeedingError::Read { .. }));
    }

    #[rstest]
    #[case("{}")]
    #[case("[{\"id\": \"one\"}]")]
    #[case("not json")]
    fn malformed_catalogue_is_a_parse_error(#[case] contents: &str) {
        let (_dir, path) = write_catalogue(contents);
        let err = load_catalogue(&path).expect_err("malformed catalogue");
        assert!(matches!(err, TemplateSeedingError::Parse { .. }));
    }

    #[tokio::test]
    async fn unconfigured_path_skips_seeding() {
        let mut seeder = MockTemplateCatalogueSeeder::new();
        seeder.expect_seed().never();
        let summary = seed_templates_on_startup(None, &seeder)
            .await
            .expect("skip succeeds");
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn forwards_parsed_templates_to_the_seeder() {
        let (_dir, path) = write_catalogue(CATALOGUE);
        let mut seeder = MockTemplateCatalogueSeeder::new();
        seeder
            .expect_seed()
            .withf(|templates| templates.len() == 2)
            .times(1)
            .return_once(|_| {
                Ok(TemplateSeedSummary {
                    inserted: 1,
                    skipped: 1,
                })
            });

        let summary = seed_templates_on_startup(Some(&path), &seeder)
            .await
            .expect("seeding succeeds");
        assert_eq!(
            summary,
            Some(TemplateSeedSummary {
                inserted: 1,
                skipped: 1,
            })
        );
    }

    #[tokio::test]
    async fn seeder_failures_propagate() {
        let (_dir, path) = write_catalogue(CATALOGUE);
        let mut seeder = MockTemplateCatalogueSeeder::new();
        seeder
            .expect_seed()
            .return_once(|_| Err(TemplateCatalogueSeedError::connection("refused")));

        let err = seed_templates_on_startup(Some(&path), &seeder)
            .await
            .expect_err("seeding fails");
        assert!(matches!(err, TemplateSeedingError::Seeding(_)));
    }
}

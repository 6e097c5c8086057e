//! JSON snapshot persistence.
//!
//! The whole store is loaded from one JSON file on open and rewritten after
//! every successful write. Writes go to a sibling temp file first and are
//! renamed into place.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info, instrument};

use branchline_core::{
    application::ApplicationError,
    error::{BranchlineError, BranchlineResult},
};

use crate::memory::{Flush, InMemoryStore, Snapshot};

/// A store file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (or start) the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on the first
    /// write.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> BranchlineResult<InMemoryStore> {
        let file = Self {
            path: path.as_ref().to_path_buf(),
        };
        let snapshot = file.load()?;

        info!(
            franchises = snapshot.franchises.len(),
            offices = snapshot.offices.len(),
            products = snapshot.products.len(),
            "store loaded"
        );

        Ok(InMemoryStore::from_snapshot(snapshot)?.with_sink(Arc::new(file)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BranchlineResult<Snapshot> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Snapshot::default()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                storage_error(&self.path, format!("Failed to parse store file: {e}"))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("store file does not exist yet, starting empty");
                Ok(Snapshot::default())
            }
            Err(e) => Err(map_io_error(&self.path, e, "read store file")),
        }
    }
}

impl Flush for JsonFileStore {
    fn flush(&self, snapshot: &Snapshot) -> BranchlineResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }

        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| storage_error(&self.path, format!("Failed to serialize store: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| map_io_error(&tmp, e, "write file"))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| map_io_error(&self.path, e, "replace store file"))?;

        debug!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}

fn storage_error(path: &Path, reason: String) -> BranchlineError {
    ApplicationError::Storage {
        reason: format!("{}: {reason}", path.display()),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BranchlineError {
    storage_error(path, format!("Failed to {operation}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchline_core::domain::{Franchise, Office};
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_opens_empty_and_is_created_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert!(!path.exists());

        store
            .catalog()
            .franchises
            .create(Franchise::new(None, "acme").unwrap())
            .await
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn reopened_store_sees_previous_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let catalog = JsonFileStore::open(&path).unwrap().catalog();
            let acme = catalog
                .franchises
                .create(Franchise::new(None, "acme").unwrap())
                .await
                .unwrap();
            catalog
                .offices
                .create(Office::new(None, "north", acme.id().unwrap()).unwrap())
                .await
                .unwrap();
        }

        let snapshot = JsonFileStore::open(&path).unwrap().snapshot().unwrap();
        assert_eq!(snapshot.franchises.len(), 1);
        assert_eq!(snapshot.offices[0].name().as_str(), "NORTH");
        assert_eq!(snapshot.next_ids.office, 2);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("Failed to parse store file"));
    }

    #[test]
    fn invalid_records_in_file_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r#"{ "franchises": [ { "id": 1, "name": "   " } ] }"#,
        )
        .unwrap();

        assert!(JsonFileStore::open(&path).is_err());
    }

    #[test]
    fn duplicate_records_in_file_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        std::fs::write(
            &path,
            r#"{ "franchises": [ { "id": 1, "name": "acme" }, { "id": 1, "name": "zen" } ] }"#,
        )
        .unwrap();
        let err = JsonFileStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("duplicate franchise id 1"));

        std::fs::write(
            &path,
            r#"{ "franchises": [ { "id": 1, "name": "acme" }, { "id": 2, "name": " Acme" } ] }"#,
        )
        .unwrap();
        let err = JsonFileStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("reuses the name [ACME]"));
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        // A directory where the store file should be makes every rename fail.
        let path = dir.path().join("store.json");
        std::fs::create_dir(&path).unwrap();

        let blocked = InMemoryStore::new().with_sink(Arc::new(JsonFileStore { path }));

        assert!(
            blocked
                .catalog()
                .franchises
                .create(Franchise::new(None, "acme").unwrap())
                .await
                .is_err()
        );
        assert!(blocked.snapshot().unwrap().franchises.is_empty());
        assert_eq!(blocked.snapshot().unwrap().next_ids.franchise, 1);
    }
}

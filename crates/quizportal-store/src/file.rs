//! One text file per collection, one record per line.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use quizportal_core::error::StoreError;
use quizportal_core::records::Collection;
use quizportal_core::traits::RecordStore;

/// A `RecordStore` rooted at a data directory.
///
/// Every call opens, writes, and closes its file, so each write is on disk
/// when the call returns.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the data directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `collection`.
    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

impl RecordStore for FileStore {
    fn exists(&self, collection: Collection) -> Result<bool, StoreError> {
        Ok(self.path_of(collection).is_file())
    }

    fn read_all(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        match fs::read(self.path_of(collection)) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::io(collection, e)),
        }
    }

    fn append_record(&self, collection: Collection, record: &str) -> Result<(), StoreError> {
        let path = self.path_of(collection);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(collection, e))?;
        writeln!(file, "{record}").map_err(|e| StoreError::io(collection, e))?;
        tracing::debug!(path = %path.display(), "record appended");
        Ok(())
    }

    fn reset_and_write(
        &self,
        collection: Collection,
        records: &[String],
    ) -> Result<(), StoreError> {
        let path = self.path_of(collection);
        let mut file = File::create(&path).map_err(|e| StoreError::io(collection, e))?;
        for record in records {
            writeln!(file, "{record}").map_err(|e| StoreError::io(collection, e))?;
        }
        tracing::debug!(path = %path.display(), count = records.len(), "collection rewritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_collection_reads_empty() {
        let (_dir, store) = store();
        assert!(!store.exists(Collection::Results).unwrap());
        assert!(store.read_all(Collection::Results).unwrap().is_empty());
    }

    #[test]
    fn append_writes_one_line_per_record() {
        let (dir, store) = store();
        store.append_record(Collection::Results, "Ann 1 2").unwrap();
        store.append_record(Collection::Results, "Ben 1 3").unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert_eq!(on_disk, "Ann 1 2\nBen 1 3\n");
        assert_eq!(
            store.read_all(Collection::Results).unwrap(),
            vec!["Ann 1 2", "Ben 1 3"]
        );
    }

    #[test]
    fn reset_truncates() {
        let (_dir, store) = store();
        store.append_record(Collection::Quiz, "1|old|x").unwrap();
        store
            .reset_and_write(Collection::Quiz, &["2|new|y".to_string(), "3|newer|z".to_string()])
            .unwrap();
        assert_eq!(
            store.read_all(Collection::Quiz).unwrap(),
            vec!["2|new|y", "3|newer|z"]
        );
    }

    #[test]
    fn reads_files_written_by_hand() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("admin_creds.txt"), "root toor").unwrap();
        std::fs::write(dir.path().join("children.txt"), "Ann\r\nBen\r\n").unwrap();

        assert_eq!(
            store.read_all(Collection::AdminCredentials).unwrap(),
            vec!["root toor"]
        );
        assert_eq!(store.read_all(Collection::Children).unwrap(), vec!["Ann", "Ben"]);
    }

    #[test]
    fn non_utf8_bytes_do_not_fail_the_read() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("children.txt"), b"Ann\nRen\xe9e\nBen\n").unwrap();

        assert_eq!(
            store.read_all(Collection::Children).unwrap(),
            vec!["Ann", "Ren\u{fffd}e", "Ben"]
        );
    }

    #[test]
    fn open_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("portal").join("data");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.path_of(Collection::Replies), nested.join("replies.txt"));
    }
}

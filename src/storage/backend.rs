use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;

use super::errors::{BackendError, BackendResult};
use crate::common::{Comment, CommentId};

/// The physical storage medium behind the comment store.
///
/// Implementations own all mutable state and synchronize internally, so a
/// backend can be shared across threads while the store above it stays
/// stateless. Every method is atomic on its own:
///
/// - `insert` checks the parent-existence constraint and writes the record
///   under a single write lock, so a concurrent delete of the parent can
///   never leave a dangling `parent_id` behind.
/// - `remove_subtree` collects and removes a comment together with all of
///   its transitive descendants in one step; readers observe either the
///   whole subtree or none of it.
/// - `children` and `scan` return point-in-time snapshots; ordering is the
///   query engine's job, not the medium's.
pub trait CommentBackend: Send + Sync {
    /// Insert a comment. Fails with [`BackendError::ParentMissing`] when
    /// `parent_id` references no stored comment.
    fn insert(&self, comment: &Comment) -> BackendResult<()>;

    /// Fetch a single comment by id.
    fn get(&self, id: CommentId) -> BackendResult<Option<Comment>>;

    /// All comments whose `parent_id` equals the given id, unordered.
    /// An unknown id yields an empty vector.
    fn children(&self, parent_id: CommentId) -> BackendResult<Vec<Comment>>;

    /// Snapshot of every stored comment, unordered.
    fn scan(&self) -> BackendResult<Vec<Comment>>;

    /// Remove the comment and its entire subtree atomically, returning the
    /// number of removed comments. Fails with [`BackendError::Missing`]
    /// when the root id is absent.
    fn remove_subtree(&self, id: CommentId) -> BackendResult<usize>;
}

fn insert_record(
    records: &mut HashMap<CommentId, Comment>,
    comment: &Comment,
) -> BackendResult<()> {
    if let Some(parent_id) = comment.parent_id {
        if !records.contains_key(&parent_id) {
            return Err(BackendError::parent_missing(parent_id));
        }
    }
    records.insert(comment.id, comment.clone());
    Ok(())
}

fn remove_subtree_records(
    records: &mut HashMap<CommentId, Comment>,
    id: CommentId,
) -> BackendResult<usize> {
    if !records.contains_key(&id) {
        return Err(BackendError::missing(id));
    }

    // Breadth-first walk over the parent pointers; the forest is acyclic,
    // so this terminates.
    let mut doomed = vec![id];
    let mut cursor = 0;
    while cursor < doomed.len() {
        let current = doomed[cursor];
        doomed.extend(
            records
                .values()
                .filter(|c| c.parent_id == Some(current))
                .map(|c| c.id),
        );
        cursor += 1;
    }

    for victim in &doomed {
        records.remove(victim);
    }
    Ok(doomed.len())
}

/// In-memory storage medium, used in tests and as the semantics reference.
#[derive(Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<CommentId, Comment>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(&self) -> BackendResult<RwLockReadGuard<'_, HashMap<CommentId, Comment>>> {
        self.records
            .read()
            .map_err(|_| BackendError::corrupt("store lock poisoned"))
    }

    fn write_guard(&self) -> BackendResult<RwLockWriteGuard<'_, HashMap<CommentId, Comment>>> {
        self.records
            .write()
            .map_err(|_| BackendError::corrupt("store lock poisoned"))
    }
}

impl CommentBackend for MemoryBackend {
    fn insert(&self, comment: &Comment) -> BackendResult<()> {
        let mut records = self.write_guard()?;
        insert_record(&mut records, comment)
    }

    fn get(&self, id: CommentId) -> BackendResult<Option<Comment>> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    fn children(&self, parent_id: CommentId) -> BackendResult<Vec<Comment>> {
        Ok(self
            .read_guard()?
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    fn scan(&self) -> BackendResult<Vec<Comment>> {
        Ok(self.read_guard()?.values().cloned().collect())
    }

    fn remove_subtree(&self, id: CommentId) -> BackendResult<usize> {
        let mut records = self.write_guard()?;
        remove_subtree_records(&mut records, id)
    }
}

/// Durable storage medium backed by a single JSON file.
///
/// The whole record set is rewritten on every mutation: serialized to a
/// temporary file in the same directory and renamed over the target, so a
/// crash mid-write leaves the previous file intact. Mutations hold the
/// write lock across the read-modify-persist cycle, which makes the
/// constraint check and the write consistent with each other.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    records: RwLock<HashMap<CommentId, Comment>>,
}

impl JsonFileBackend {
    /// Open the store file at `path`, loading existing comments. A missing
    /// file is an empty store; it is created on the first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> BackendResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut records = HashMap::new();

        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let stored: Vec<Comment> = serde_json::from_str(&data)?;
            for comment in stored {
                if records.insert(comment.id, comment).is_some() {
                    return Err(BackendError::corrupt(format!(
                        "duplicate comment id in {}",
                        path.display()
                    )));
                }
            }
        }

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_guard(&self) -> BackendResult<RwLockReadGuard<'_, HashMap<CommentId, Comment>>> {
        self.records
            .read()
            .map_err(|_| BackendError::corrupt("store lock poisoned"))
    }

    fn write_guard(&self) -> BackendResult<RwLockWriteGuard<'_, HashMap<CommentId, Comment>>> {
        self.records
            .write()
            .map_err(|_| BackendError::corrupt("store lock poisoned"))
    }

    fn persist(&self, records: &HashMap<CommentId, Comment>) -> BackendResult<()> {
        let mut stored: Vec<&Comment> = records.values().collect();
        stored.sort_by_key(|c| (c.created_at, c.id));
        let json = serde_json::to_string_pretty(&stored)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(&self.path).map_err(|e| BackendError::Io(e.error))?;

        log::debug!("persisted {} comments to {}", stored.len(), self.path.display());
        Ok(())
    }
}

impl CommentBackend for JsonFileBackend {
    fn insert(&self, comment: &Comment) -> BackendResult<()> {
        let mut records = self.write_guard()?;
        insert_record(&mut records, comment)?;
        if let Err(err) = self.persist(&records) {
            // Keep memory and disk consistent when the write fails.
            records.remove(&comment.id);
            return Err(err);
        }
        Ok(())
    }

    fn get(&self, id: CommentId) -> BackendResult<Option<Comment>> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    fn children(&self, parent_id: CommentId) -> BackendResult<Vec<Comment>> {
        Ok(self
            .read_guard()?
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    fn scan(&self) -> BackendResult<Vec<Comment>> {
        Ok(self.read_guard()?.values().cloned().collect())
    }

    fn remove_subtree(&self, id: CommentId) -> BackendResult<usize> {
        let mut records = self.write_guard()?;
        let before = records.clone();
        let removed = remove_subtree_records(&mut records, id)?;
        if let Err(err) = self.persist(&records) {
            *records = before;
            return Err(err);
        }
        Ok(removed)
    }
}

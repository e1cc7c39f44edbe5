use super::errors::{BackendError, StoreError, StoreResult};
use super::query;
use super::CommentBackend;
use crate::common::{validate_content, Comment, CommentId, ListQuery, SortOrder};

/// Threaded comment storage with invariant enforcement on the write path.
///
/// `CommentStore` is a stateless façade over a [`CommentBackend`]: all
/// authoritative state lives in the backend, so the store can be shared
/// freely across threads. Comments form a forest linked by single parent
/// pointers; parents are never reassigned, which together with the insert
/// constraint keeps the forest acyclic.
///
/// ## Guarantees
///
/// - **Referential integrity**: a reply is only accepted while its parent
///   exists; the backend checks the constraint atomically with the write.
/// - **Cascade delete**: deleting a comment removes its whole subtree in
///   one atomic backend operation, never leaving dangling `parent_id`s.
/// - **Deterministic listings**: all ordering breaks timestamp ties by id,
///   so pagination over unchanged data is repeatable and complete.
///
/// ## Example Usage
///
/// ```rust,no_run
/// use comment_tree::storage::{CommentStore, MemoryBackend};
///
/// let store = CommentStore::new(MemoryBackend::new());
/// let root = store.create(None, "First!")?;
/// let reply = store.create(Some(root.id), "Welcome")?;
/// assert_eq!(store.children_of(root.id)?, vec![reply]);
/// # Ok::<(), comment_tree::storage::StoreError>(())
/// ```
pub struct CommentStore<B: CommentBackend> {
    backend: B,
}

impl<B: CommentBackend> CommentStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Create a comment, optionally as a reply to an existing one.
    ///
    /// Content is validated first (`Validation` on bad input), then the
    /// backend inserts with the parent constraint checked atomically
    /// (`ParentNotFound` when the parent is gone). On success exactly one
    /// new comment exists, with `created_at == updated_at`.
    pub fn create(&self, parent_id: Option<CommentId>, content: &str) -> StoreResult<Comment> {
        validate_content(content).map_err(StoreError::validation)?;

        let comment = Comment::new(parent_id, content.to_string());
        match self.backend.insert(&comment) {
            Ok(()) => Ok(comment),
            Err(BackendError::ParentMissing { id }) => Err(StoreError::parent_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch a single comment by id.
    pub fn get(&self, id: CommentId) -> StoreResult<Comment> {
        self.backend
            .get(id)?
            .ok_or_else(|| StoreError::comment_not_found(id))
    }

    /// Delete a comment and its entire reply subtree, returning how many
    /// comments were removed. The removal is atomic: a partially deleted
    /// subtree is never observable.
    pub fn delete(&self, id: CommentId) -> StoreResult<usize> {
        match self.backend.remove_subtree(id) {
            Ok(removed) => Ok(removed),
            Err(BackendError::Missing { id }) => Err(StoreError::comment_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Direct children of a comment, ordered by creation time (ties by id).
    ///
    /// The parent must exist: a missing parent is `CommentNotFound`, an
    /// existing childless parent yields an empty vector.
    pub fn children_of(&self, parent_id: CommentId) -> StoreResult<Vec<Comment>> {
        if self.backend.get(parent_id)?.is_none() {
            return Err(StoreError::comment_not_found(parent_id));
        }
        let mut children = self.backend.children(parent_id)?;
        query::sort(&mut children, SortOrder::CreatedAtAsc);
        Ok(children)
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// With `parent_id` the scope is that comment's direct children (an
    /// unknown id simply matches nothing); without it the query runs over
    /// the entire forest. Zero matches is success, not an error.
    pub fn list(&self, query: &ListQuery) -> StoreResult<Vec<Comment>> {
        let snapshot = match query.parent_id {
            Some(parent_id) => self.backend.children(parent_id)?,
            None => self.backend.scan()?,
        };
        Ok(query::apply(snapshot, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use uuid::Uuid;

    fn setup_store() -> CommentStore<MemoryBackend> {
        CommentStore::new(MemoryBackend::new())
    }

    fn list_query(
        parent_id: Option<CommentId>,
        search: Option<&str>,
        sort: SortOrder,
    ) -> ListQuery {
        ListQuery::new(parent_id, search.map(String::from), sort, None, None)
    }

    #[test]
    fn test_create_root_comment() {
        let store = setup_store();

        let comment = store.create(None, "hello").unwrap();
        assert!(comment.is_root());
        assert_eq!(comment.content, "hello");
        assert_eq!(store.get(comment.id).unwrap(), comment);
    }

    #[test]
    fn test_create_rejects_empty_content() {
        let store = setup_store();

        let err = store.create(None, "   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert!(store.list(&ListQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_overlong_content() {
        let store = setup_store();

        let err = store.create(None, &"x".repeat(801)).unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
    }

    #[test]
    fn test_create_with_missing_parent() {
        let store = setup_store();
        let ghost = Uuid::new_v4();

        let err = store.create(Some(ghost), "x").unwrap_err();
        assert!(matches!(err, StoreError::ParentNotFound { id } if id == ghost));
    }

    #[test]
    fn test_children_of_returns_ordered_replies() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        let first = store.create(Some(root.id), "first reply").unwrap();
        let second = store.create(Some(root.id), "second reply").unwrap();
        // A grandchild is not a direct child of the root.
        store.create(Some(first.id), "nested").unwrap();

        let children = store.children_of(root.id).unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.contains(&first));
        assert!(children.contains(&second));

        let mut expected = vec![first, second];
        expected.sort_by_key(|c| (c.created_at, c.id));
        assert_eq!(children, expected);
    }

    #[test]
    fn test_children_of_missing_parent_is_an_error() {
        let store = setup_store();

        let err = store.children_of(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::CommentNotFound { .. }));
    }

    #[test]
    fn test_children_of_childless_parent_is_empty() {
        let store = setup_store();
        let root = store.create(None, "lonely").unwrap();

        assert!(store.children_of(root.id).unwrap().is_empty());
    }

    #[test]
    fn test_list_scans_entire_forest_without_parent() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        let reply = store.create(Some(root.id), "reply").unwrap();
        let nested = store.create(Some(reply.id), "nested").unwrap();

        let all = store
            .list(&list_query(None, None, SortOrder::CreatedAtAsc))
            .unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&nested));
    }

    #[test]
    fn test_list_scoped_to_parent_is_direct_children_only() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        let reply = store.create(Some(root.id), "reply").unwrap();
        store.create(Some(reply.id), "nested").unwrap();

        let scoped = store
            .list(&list_query(Some(root.id), None, SortOrder::CreatedAtAsc))
            .unwrap();
        assert_eq!(scoped, vec![reply]);
    }

    #[test]
    fn test_list_unknown_parent_is_empty_not_error() {
        let store = setup_store();
        store.create(None, "something").unwrap();

        let scoped = store
            .list(&list_query(Some(Uuid::new_v4()), None, SortOrder::CreatedAtAsc))
            .unwrap();
        assert!(scoped.is_empty());
    }

    #[test]
    fn test_cascade_delete_removes_whole_subtree() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        let reply = store.create(Some(root.id), "reply").unwrap();
        let nested = store.create(Some(reply.id), "nested").unwrap();
        let survivor = store.create(None, "survivor").unwrap();

        assert_eq!(store.delete(root.id).unwrap(), 3);

        for gone in [root.id, reply.id, nested.id] {
            assert!(matches!(
                store.get(gone).unwrap_err(),
                StoreError::CommentNotFound { .. }
            ));
        }
        assert_eq!(store.get(survivor.id).unwrap(), survivor);

        // No remaining comment may reference the deleted subtree.
        let all = store.list(&ListQuery::default()).unwrap();
        assert!(all.iter().all(|c| c.parent_id.is_none()));
    }

    #[test]
    fn test_delete_missing_comment() {
        let store = setup_store();

        let err = store.delete(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::CommentNotFound { .. }));
    }

    #[test]
    fn test_reply_after_parent_deleted_is_rejected() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        store.delete(root.id).unwrap();

        let err = store.create(Some(root.id), "too late").unwrap_err();
        assert!(matches!(err, StoreError::ParentNotFound { .. }));
    }

    #[test]
    fn test_hello_world_scenario() {
        let store = setup_store();

        let a = store.create(None, "hello").unwrap();
        let b = store.create(Some(a.id), "world").unwrap();

        assert_eq!(store.children_of(a.id).unwrap(), vec![b.clone()]);

        let found = store
            .list(&list_query(None, Some("wor"), SortOrder::CreatedAtAsc))
            .unwrap();
        assert_eq!(found, vec![b.clone()]);

        assert_eq!(store.delete(a.id).unwrap(), 2);
        assert!(matches!(
            store.children_of(a.id).unwrap_err(),
            StoreError::CommentNotFound { .. }
        ));
        assert!(matches!(
            store.get(b.id).unwrap_err(),
            StoreError::CommentNotFound { .. }
        ));
    }

    #[test]
    fn test_list_is_deterministic_across_calls() {
        let store = setup_store();
        let root = store.create(None, "root").unwrap();
        for i in 0..5 {
            store.create(Some(root.id), &format!("reply {}", i)).unwrap();
        }

        let q = list_query(None, None, SortOrder::CreatedAtDesc);
        assert_eq!(store.list(&q).unwrap(), store.list(&q).unwrap());
    }
}

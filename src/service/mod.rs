use crate::common::{Comment, CommentId, ListQuery};
use crate::storage::{CommentBackend, CommentStore, StoreResult};

/// Thin orchestration façade consumed by the outer surface (the CLI here,
/// an HTTP layer elsewhere). Operations forward to the store unchanged;
/// the only added responsibility is tracing each call.
pub struct CommentService<B: CommentBackend> {
    store: CommentStore<B>,
}

impl<B: CommentBackend> CommentService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: CommentStore::new(backend),
        }
    }

    pub fn create_comment(
        &self,
        parent_id: Option<CommentId>,
        content: &str,
    ) -> StoreResult<Comment> {
        log::debug!("create comment (parent: {:?})", parent_id);
        let comment = self.store.create(parent_id, content)?;
        log::info!("created comment {}", comment.id);
        Ok(comment)
    }

    pub fn get_comment(&self, id: CommentId) -> StoreResult<Comment> {
        log::debug!("get comment {}", id);
        self.store.get(id)
    }

    pub fn get_children(&self, parent_id: CommentId) -> StoreResult<Vec<Comment>> {
        log::debug!("get children of {}", parent_id);
        self.store.children_of(parent_id)
    }

    pub fn list_comments(&self, query: &ListQuery) -> StoreResult<Vec<Comment>> {
        log::debug!("list comments: {:?}", query);
        self.store.list(query)
    }

    pub fn delete_comment(&self, id: CommentId) -> StoreResult<usize> {
        log::debug!("delete comment {}", id);
        let removed = self.store.delete(id)?;
        log::info!("deleted comment {} ({} removed)", id, removed);
        Ok(removed)
    }
}

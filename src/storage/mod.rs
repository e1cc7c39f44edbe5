pub mod backend;
pub mod comment_store;
pub mod errors;
pub mod query;

pub use backend::{CommentBackend, JsonFileBackend, MemoryBackend};
pub use comment_store::CommentStore;
pub use errors::{BackendError, BackendResult, StoreError, StoreResult};

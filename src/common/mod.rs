pub mod comment;
pub mod query;

pub use comment::*;
pub use query::*;

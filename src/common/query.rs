use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::CommentId;

/// Default page size when the caller passes no (or a non-positive) limit.
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    CreatedAtAsc,
    CreatedAtDesc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::CreatedAtAsc => write!(f, "created_at_asc"),
            SortOrder::CreatedAtDesc => write!(f, "created_at_desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created_at_asc" | "asc" => Ok(SortOrder::CreatedAtAsc),
            "created_at_desc" | "desc" => Ok(SortOrder::CreatedAtDesc),
            _ => Err(anyhow::anyhow!("Invalid sort order: {}", s)),
        }
    }
}

/// Validated input for a listing operation.
///
/// Raw limit/offset values from the outside world are normalized in
/// [`ListQuery::new`]: a missing or non-positive limit falls back to
/// [`DEFAULT_LIMIT`], a missing or negative offset falls back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Restrict the listing to direct children of this comment.
    /// Without it the query runs over the entire forest, any depth.
    pub parent_id: Option<CommentId>,
    /// Case-insensitive substring filter on content.
    pub search: Option<String>,
    pub sort: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl ListQuery {
    pub fn new(
        parent_id: Option<CommentId>,
        search: Option<String>,
        sort: SortOrder,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Self {
        let limit = match limit {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_LIMIT,
        };
        let offset = match offset {
            Some(n) if n > 0 => n as usize,
            _ => 0,
        };
        Self {
            parent_id,
            search,
            sort,
            limit,
            offset,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(None, None, SortOrder::default(), None, None)
    }
}

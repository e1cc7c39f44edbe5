use std::cmp::Reverse;

use crate::common::{Comment, ListQuery, SortOrder};

/// Filter, sort, and paginate a snapshot of comments.
///
/// The pipeline order is fixed: search filter first, then sort, then
/// offset/limit. Sorting always breaks `created_at` ties by `id` so that
/// repeated calls over unchanged data return identical sequences and
/// paging in windows never duplicates or drops a row.
pub fn apply(mut comments: Vec<Comment>, query: &ListQuery) -> Vec<Comment> {
    if let Some(needle) = normalize_search(query.search.as_deref()) {
        comments.retain(|c| c.content.to_lowercase().contains(&needle));
    }
    sort(&mut comments, query.sort);
    comments
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect()
}

/// Sort comments by creation time with a deterministic id tie-break.
pub fn sort(comments: &mut [Comment], order: SortOrder) {
    match order {
        SortOrder::CreatedAtAsc => comments.sort_by_key(|c| (c.created_at, c.id)),
        // Ties still order by ascending id, only the timestamp reverses.
        SortOrder::CreatedAtDesc => comments.sort_by_key(|c| (Reverse(c.created_at), c.id)),
    }
}

/// Case-insensitive substring search; blank input means no filter.
fn normalize_search(search: Option<&str>) -> Option<String> {
    match search {
        Some(s) if !s.trim().is_empty() => Some(s.to_lowercase()),
        _ => None,
    }
}

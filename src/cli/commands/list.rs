use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{format_comment_compact, info_message};
use crate::common::{ListQuery, SortOrder};

use super::{open_service, parse_comment_id};

#[derive(Args)]
pub struct ListArgs {
    /// Only direct replies to this comment (whole forest when omitted)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Case-insensitive substring filter on content
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: created_at_asc or created_at_desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Page size (default 10)
    #[arg(short, long)]
    pub limit: Option<i64>,

    /// Rows to skip before the page starts
    #[arg(short, long)]
    pub offset: Option<i64>,
}

pub fn handle_list(store_path: PathBuf, args: ListArgs) -> Result<()> {
    let service = open_service(&store_path)?;

    let parent_id = args.parent.as_deref().map(parse_comment_id).transpose()?;
    let sort = match args.sort {
        Some(raw) => raw.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };

    let query = ListQuery::new(parent_id, args.search, sort, args.limit, args.offset);
    let comments = service.list_comments(&query)?;

    if comments.is_empty() {
        println!("{}", info_message("No comments found"));
        return Ok(());
    }

    for comment in comments {
        println!("{}", format_comment_compact(&comment));
    }

    Ok(())
}

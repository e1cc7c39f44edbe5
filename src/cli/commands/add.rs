use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::success_message;

use super::{open_service, parse_comment_id};

#[derive(Args)]
pub struct AddArgs {
    /// Comment content (opens $EDITOR when omitted)
    pub content: Option<String>,

    /// Parent comment id to reply to
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Compose the comment in $EDITOR even when content is given
    #[arg(long)]
    pub edit: bool,
}

pub fn handle_add(store_path: PathBuf, args: AddArgs) -> Result<()> {
    let service = open_service(&store_path)?;

    let parent_id = args.parent.as_deref().map(parse_comment_id).transpose()?;

    let content = match (args.content, args.edit) {
        (Some(content), false) => content,
        (content, _) => edit::edit(content.unwrap_or_default())?,
    };

    let comment = service.create_comment(parent_id, &content)?;

    let what = if comment.is_root() { "comment" } else { "reply" };
    println!(
        "{}",
        success_message(&format!("Added {} {}", what, comment.id))
    );
    Ok(())
}

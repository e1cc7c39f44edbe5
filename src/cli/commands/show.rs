use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{format_comment_compact, format_comment_detailed};

use super::{open_service, parse_comment_id};

#[derive(Args)]
pub struct ShowArgs {
    /// Comment id to show
    pub id: String,
}

pub fn handle_show(store_path: PathBuf, args: ShowArgs) -> Result<()> {
    let service = open_service(&store_path)?;
    let id = parse_comment_id(&args.id)?;

    let comment = service.get_comment(id)?;
    let replies = service.get_children(id)?;

    print!("{}", format_comment_detailed(&comment));

    if !replies.is_empty() {
        println!("\nReplies:");
        for reply in replies {
            println!("  {}", format_comment_compact(&reply));
        }
    }

    Ok(())
}

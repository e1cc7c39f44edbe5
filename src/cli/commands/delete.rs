use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::success_message;

use super::{open_service, parse_comment_id};

#[derive(Args)]
pub struct DeleteArgs {
    /// Comment id to delete (replies are removed with it)
    pub id: String,
}

pub fn handle_delete(store_path: PathBuf, args: DeleteArgs) -> Result<()> {
    let service = open_service(&store_path)?;
    let id = parse_comment_id(&args.id)?;

    let removed = service.delete_comment(id)?;

    println!(
        "{}",
        success_message(&format!(
            "Deleted {} comment{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ))
    );
    Ok(())
}

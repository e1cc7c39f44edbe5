use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod add;
mod delete;
mod list;
mod show;

pub use add::{handle_add, AddArgs};
pub use delete::{handle_delete, DeleteArgs};
pub use list::{handle_list, ListArgs};
pub use show::{handle_show, ShowArgs};

use crate::common::CommentId;
use crate::service::CommentService;
use crate::storage::JsonFileBackend;

#[derive(Parser)]
#[command(name = "comment-tree")]
#[command(about = "A threaded comment store with search and pagination")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Comment store file (defaults to ./comments.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a comment or a reply
    Add(AddArgs),
    /// List comments with filtering, search, and pagination
    List(ListArgs),
    /// Show a comment and its direct replies
    Show(ShowArgs),
    /// Delete a comment and its whole reply subtree
    Delete(DeleteArgs),
}

pub fn run_command(cli: Cli) -> Result<()> {
    let store_path = cli.store.unwrap_or_else(|| PathBuf::from("comments.json"));

    match cli.command {
        Commands::Add(args) => handle_add(store_path, args),
        Commands::List(args) => handle_list(store_path, args),
        Commands::Show(args) => handle_show(store_path, args),
        Commands::Delete(args) => handle_delete(store_path, args),
    }
}

pub(crate) fn open_service(path: &Path) -> Result<CommentService<JsonFileBackend>> {
    let backend = JsonFileBackend::open(path)?;
    Ok(CommentService::new(backend))
}

/// Parse a comment id argument before it reaches the store.
pub(crate) fn parse_comment_id(raw: &str) -> Result<CommentId> {
    CommentId::parse_str(raw).map_err(|_| anyhow::anyhow!("Invalid comment id: '{}'", raw))
}

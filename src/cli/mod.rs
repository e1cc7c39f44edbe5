pub mod commands;
pub mod output;

pub use commands::{run_command, Cli};
pub use output::error_message;

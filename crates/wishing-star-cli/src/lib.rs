// Library interface for wishing-star-cli
// This allows integration tests to access internal modules

pub mod app;
pub mod commands;

pub use app::{failure_reply, status_line};
pub use commands::{handle_command, CommandResult};

pub mod commands;
pub mod context;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use context::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;

mod commands;
pub mod handlers;

pub use commands::{CheckPepsCli, Cli, Commands};

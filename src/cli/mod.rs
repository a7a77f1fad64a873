pub mod commands;

pub use commands::{Cli, Commands, FilterArgs, run, run_with};

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, RecordFormat};
pub use commands::run;

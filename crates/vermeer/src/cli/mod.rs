//! Command-line interface module.

mod commands;
mod mirror;

pub use commands::{Cli, Commands};
pub use mirror::{handle_classify, handle_mirror};

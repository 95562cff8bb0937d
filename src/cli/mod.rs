//! Command-line interface module.

mod args;
pub mod publish;
pub mod route;
pub mod serve;
pub mod stack;

pub use args::{Cli, Commands};

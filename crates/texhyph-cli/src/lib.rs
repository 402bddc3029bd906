#![forbid(unsafe_code)]

//! `texhyph` command-line front end.

pub mod cli;
pub mod error;

pub use cli::{Cli, run, run_from_env};
pub use error::{CliError, Result};

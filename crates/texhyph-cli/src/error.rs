use std::path::PathBuf;

use texhyph::LoadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load patterns from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Load { .. } => 2,
            _ => 1,
        }
    }
}

/// Error types for the script tokenizer

use std::path::{Path, PathBuf};

use script_tokenizer_ini::IniError;
use thiserror::Error;

use crate::execute::ScriptOutcome;

pub type Result<T> = std::result::Result<T, TokenizerError>;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Unable to access token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed token file {path}: {source}")]
    TokenFileSyntax {
        path: PathBuf,
        #[source]
        source: IniError,
    },

    #[error("{0} already exists (pass --clobber to overwrite it)")]
    OutputExists(PathBuf),

    #[error("Cannot derive an output file name from {0}")]
    InvalidScriptPath(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script {path} failed with {outcome}")]
    ScriptFailed { path: PathBuf, outcome: ScriptOutcome },
}

impl TokenizerError {
    pub fn usage(message: impl Into<String>) -> Self {
        TokenizerError::Usage(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TokenizerError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

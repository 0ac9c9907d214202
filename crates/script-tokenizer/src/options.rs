/// Run configuration, built once from the command line

use std::path::{Path, PathBuf};

use crate::error::{Result, TokenizerError};

/// Appended to the file name of every generated script
pub const TOK_SUFFIX: &str = ".tok";

/// Options for a tokenizer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Token definition file
    pub token_file: PathBuf,
    /// Scripts to tokenize, in processing order
    pub scripts: Vec<PathBuf>,
    /// Directory for generated files (defaults to the current directory)
    pub output_dir: Option<PathBuf>,
    /// Overwrite generated files left by an earlier run
    pub clobber: bool,
    /// Run each generated file once all of them are written
    pub execute_scripts: bool,
    /// Stop at the first generated file that exits unsuccessfully
    pub break_on_error: bool,
}

impl RunOptions {
    pub fn new<I, P>(token_file: impl Into<PathBuf>, scripts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            token_file: token_file.into(),
            scripts: scripts.into_iter().map(Into::into).collect(),
            output_dir: None,
            clobber: false,
            execute_scripts: false,
            break_on_error: false,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn clobber(mut self, clobber: bool) -> Self {
        self.clobber = clobber;
        self
    }

    pub fn execute_scripts(mut self, execute: bool) -> Self {
        self.execute_scripts = execute;
        self
    }

    pub fn break_on_error(mut self, break_on_error: bool) -> Self {
        self.break_on_error = break_on_error;
        self
    }

    /// The directory generated files are written to
    pub fn destination_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(Path::new("."))
    }

    pub fn validate(&self) -> Result<()> {
        if self.scripts.is_empty() {
            return Err(TokenizerError::usage("at least one script must be given"));
        }
        Ok(())
    }
}

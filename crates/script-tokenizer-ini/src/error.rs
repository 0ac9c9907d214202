/// Error types for the token file reader

use thiserror::Error;

use crate::interpolate::MAX_INTERPOLATION_DEPTH;

pub type Result<T> = std::result::Result<T, IniError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: entry appears before any [section] header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: section [{name}] is declared more than once")]
    DuplicateSection { name: String, line: usize },

    #[error("line {line}: option '{option}' is already defined in section [{section}]")]
    DuplicateOption {
        section: String,
        option: String,
        line: usize,
    },

    #[error("line {line}: cannot parse '{content}'")]
    InvalidLine { line: usize, content: String },

    #[error("{message}")]
    Syntax { message: String },

    #[error("no section named [{0}]")]
    NoSection(String),

    #[error("bad value for '{option}' in [{section}]: reference to undefined option '{reference}'")]
    MissingReference {
        section: String,
        option: String,
        reference: String,
    },

    #[error("bad value for '{option}' in [{section}]: {message}")]
    InterpolationSyntax {
        section: String,
        option: String,
        message: String,
    },

    #[error(
        "value of '{option}' in [{section}] nests references more than {max} levels deep",
        max = MAX_INTERPOLATION_DEPTH
    )]
    InterpolationDepth { section: String, option: String },
}

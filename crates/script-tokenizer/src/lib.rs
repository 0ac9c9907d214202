//! Script tokenizer
//!
//! Stamps environment-specific values into otherwise static scripts: every
//! occurrence of a token name is replaced by its value, the result is saved
//! under the script name plus a `.tok` suffix, and the generated files can be run
//! in order.

pub mod driver;
pub mod error;
pub mod execute;
pub mod options;
pub mod output;
pub mod substitute;
pub mod tokens;

pub use driver::{RunSummary, Tokenizer};
pub use error::{Result, TokenizerError};
pub use execute::{Execution, ScriptOutcome};
pub use options::{RunOptions, TOK_SUFFIX};
pub use output::{destination_path, GeneratedFile};
pub use substitute::substitute_line;
pub use tokens::{TokenTable, TOKEN_SECTION};

//! Reader for the INI-style token files consumed by `script-tokenizer`,
//! built on `rust-ini`.
//!
//! Option names are case-sensitive. Values may refer to other options of
//! the same section (or of `[DEFAULT]`) with `%(name)s`; a literal percent
//! sign is written `%%`.

mod error;
mod interpolate;
mod parser;

pub use error::{IniError, Result};
pub use interpolate::MAX_INTERPOLATION_DEPTH;
pub use parser::{Document, DEFAULT_SECTION};

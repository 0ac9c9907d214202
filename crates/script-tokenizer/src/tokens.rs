/// Token table loading

use std::collections::BTreeMap;
use std::path::Path;

use script_tokenizer_ini::{Document, IniError};
use tracing::debug;

use crate::error::{Result, TokenizerError};

/// Section of the token file holding the token definitions
pub const TOKEN_SECTION: &str = "script-tokenizer";

/// Token names mapped to their replacement values
///
/// Iteration, and therefore replacement, follows lexicographic order of the
/// token names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    tokens: BTreeMap<String, String>,
}

impl TokenTable {
    /// Read and parse a token file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TokenizerError::TokenFile {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(path, &text)?;
        debug!("Loaded {} tokens from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse token file text; `path` is only used for error reporting
    pub fn parse(path: impl AsRef<Path>, text: &str) -> Result<Self> {
        let syntax = |source: IniError| TokenizerError::TokenFileSyntax {
            path: path.as_ref().to_path_buf(),
            source,
        };

        let tokens = Document::parse(text)
            .and_then(|doc| doc.items(TOKEN_SECTION))
            .map_err(syntax)?;
        Ok(Self { tokens })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in replacement order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

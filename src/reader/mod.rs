//! Support for reading Ciao Prolog source text as tokens.

use std::io::ErrorKind;

pub use chars::{classify, CharClass};
pub use position::{Position, DEFAULT_TAB_WIDTH};
pub use token::{Token, TokenKind, RUNAWAY_COMMENT};
pub use tokenizer::TokenizerConfig;

mod chars;
mod position;
mod token;
mod tokenizer;


/// Split the text into tokens, counting a tab as one column.
///
/// The result always ends with an [TokenKind::EndOfFile] token with empty text,
/// so callers can look one past the last real token.
///
/// Malformed text does not fail: runaway comments, unterminated quotes and
/// incomplete numbers come back as best-effort tokens. An error means the
/// tokenizer itself is broken for this input.
pub fn tokenize(text: &str) -> ReadResult<Vec<Token>> {
    tokenize_with(text, &TokenizerConfig::default())
}

/// Split the text into tokens with the given configuration.
pub fn tokenize_with(text: &str, config: &TokenizerConfig) -> ReadResult<Vec<Token>> {
    let tokens = tokenizer::Tokenizer::new(text, config).run()?;
    tracing::trace!("tokenized {} characters into {} tokens", text.chars().count(), tokens.len());
    Ok(tokens)
}

/// Error type if tokenizing fails.
///
/// Every malformed input is recovered from locally; this only reports
/// internal faults, such as a character the dispatcher has no rule for or an
/// escape sequence that does not decode to a single character.
/// The whole call fails: no partial token list is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErr {
    Internal(String),
}

impl std::fmt::Display for ReadErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            ReadErr::Internal(e) => write!(f, "internal tokenizer error: {e}"),
        }
    }
}

impl std::error::Error for ReadErr {}

impl ReadErr {
    /// Add additional context to an error.
    pub fn annotate(self, more: impl AsRef<str>) -> Self {
        match self {
            ReadErr::Internal(e) => ReadErr::Internal(format!("{}: {}", more.as_ref(), e)),
        }
    }
}

/// The main result type for this module.
pub type ReadResult<T> = Result<T, ReadErr>;

impl From<ReadErr> for std::io::Error {
    fn from(value: ReadErr) -> Self {
        match value {
            ReadErr::Internal(s) => std::io::Error::new(ErrorKind::InvalidData, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_prefixes_context() {
        let err = ReadErr::Internal("bad escape".to_owned()).annotate("at line 3 column 4");
        assert_eq!(err, ReadErr::Internal("at line 3 column 4: bad escape".to_owned()));
        assert_eq!(
            err.to_string(),
            "internal tokenizer error: at line 3 column 4: bad escape"
        );
    }

    #[test]
    fn io_error_conversion() {
        let err: std::io::Error = ReadErr::Internal("oops".to_owned()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}

//! Ciao Prolog source support for editor integrations.
//!
//! The core is [reader::tokenize], a tokenizer for Ciao's surface syntax
//! with line/column positions for every token. On top of it:
//! - [debugger] resolves the interpreter's debugger marks to the exact
//!   predicate occurrence in the source.
//! - [diagnostics] collects warnings and errors from compiler output.

pub mod reader;

pub mod debugger;
pub mod diagnostics;

pub use reader::{tokenize, tokenize_with, ReadErr, ReadResult, Token, TokenKind};

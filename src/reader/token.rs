//! Tokens produced by the tokenizer.

use std::fmt::Display;

use super::position::Position;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Name, graphic, solo (`!`, `;`) or quoted atom.
    Atom,
    /// Never produced here; malformed quoted atoms are recovered instead.
    BadAtom,
    Number,
    /// Double-quoted text.
    String,
    Variable,
    /// `(` with no layout before it.
    SoloNoLayout,
    /// Punctuation: `(` after layout, `)`, `,`, `[`, `]`, `{`, `|`, `}`,
    /// the end-of-clause `.` and the runaway comment marker.
    Solo,
    EndOfFile,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Atom => "atom",
            TokenKind::BadAtom => "badatom",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Variable => "variable",
            TokenKind::SoloNoLayout => "solo_nolayout",
            TokenKind::Solo => "solo",
            TokenKind::EndOfFile => "end_of_file",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Text emitted in place of an unterminated block comment.
pub const RUNAWAY_COMMENT: &str = "/* ...";

/// A token along with its starting position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded text; numbers keep their literal form.
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is_atom(&self, name: &str) -> bool {
        self.kind == TokenKind::Atom && self.text == name
    }

    /// True for the marker left by a block comment that never closes.
    pub fn is_runaway_comment(&self) -> bool {
        self.kind == TokenKind::Solo && self.text == RUNAWAY_COMMENT
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}\t{}\t{:?}",
            self.position.line, self.position.column, self.kind, self.text
        )
    }
}

//! The tokenizer state machine.
//!
//! One [Tokenizer] lives for a single call to [super::tokenize_with]. It owns
//! the input, a cursor into it, the current character and the live
//! [Position]; every emitted token records a snapshot taken when the token
//! started.
//!
//! The dispatch loop and the readers for names, graphic atoms, comments and
//! layout live here. Numbers and quoted text have their own submodules.

use super::chars::{classify, is_alphanumeric, is_layout, is_symbol, CharClass};
use super::position::{Position, DEFAULT_TAB_WIDTH};
use super::token::{Token, TokenKind, RUNAWAY_COMMENT};
use super::{ReadErr, ReadResult};

mod number;
mod quoted;

/// Options for a tokenizer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Columns a tab advances by.
    pub tab_width: isize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

pub(super) struct Tokenizer {
    input: Vec<char>,
    /// Offset of the next unread character.
    cursor: usize,
    /// Current character; `None` at end of input.
    ch: Option<char>,
    position: Position,
    /// Start of the token about to be emitted.
    saved: Position,
    tab_width: isize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    pub(super) fn new(input: &str, config: &TokenizerConfig) -> Self {
        Tokenizer {
            input: input.chars().collect(),
            cursor: 0,
            ch: None,
            position: Position::default(),
            saved: Position::default(),
            tab_width: config.tab_width,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input.
    /// The result always ends with an end-of-file token.
    pub(super) fn run(mut self) -> ReadResult<Vec<Token>> {
        self.getct();
        self.read_tokens()?;
        self.add_token(TokenKind::EndOfFile, "");
        Ok(self.tokens)
    }

    /// Read the next character.
    fn getct(&mut self) {
        let ch = self.input.get(self.cursor).copied();
        if ch.is_some() {
            self.cursor += 1;
        }
        self.position.advance(ch, self.tab_width);
        self.ch = ch;
    }

    /// Look at an unread character without consuming it;
    /// `peek(0)` is the one right after the current character.
    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.cursor + offset).copied()
    }

    fn skip_layout(&mut self) {
        while is_layout(self.ch) {
            self.getct();
        }
    }

    /// Skip up to (not past) the next newline.
    fn skip_line(&mut self) {
        loop {
            self.getct();
            if self.ch == Some('\n') || self.ch.is_none() {
                break;
            }
        }
    }

    fn save_position(&mut self) {
        self.saved = self.position;
    }

    fn add_token(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(Token::new(kind, text, self.saved));
    }

    fn read_tokens(&mut self) -> ReadResult<()> {
        loop {
            self.save_position();

            match (classify(self.ch), self.ch) {
                (CharClass::EndOfFile, _) | (_, None) => return Ok(()),
                (CharClass::Layout, _) => self.read_after_layout(),
                (CharClass::LowerLetter, Some(ch)) => {
                    self.getct();
                    let name = self.read_name(ch.to_string());
                    self.add_token(TokenKind::Atom, name);
                }
                (CharClass::UpperLetterOrUnderscore, Some(ch)) => {
                    self.getct();
                    let name = self.read_name(ch.to_string());
                    self.add_token(TokenKind::Variable, name);
                }
                (CharClass::Digit, _) => self.read_number()?,
                (CharClass::GraphicSymbol, Some('/')) => {
                    self.getct();
                    self.read_possible_comment();
                }
                (CharClass::GraphicSymbol, Some('.')) => {
                    self.getct();
                    self.read_fullstop();
                }
                (CharClass::GraphicSymbol, Some(ch)) => {
                    self.getct();
                    let symbol = self.read_symbol(ch.to_string());
                    self.add_token(TokenKind::Atom, symbol);
                }
                // Solo atoms: these never merge with following symbol chars.
                (CharClass::Punctuation, Some(ch @ ('!' | ';'))) => {
                    self.add_token(TokenKind::Atom, ch);
                    self.getct();
                }
                (CharClass::Punctuation, Some('%')) => {
                    self.skip_line();
                    self.read_after_layout();
                }
                (CharClass::Punctuation, Some('(')) => {
                    self.add_token(TokenKind::SoloNoLayout, '(');
                    self.getct();
                }
                (CharClass::Punctuation, Some(ch @ (')' | ',' | '[' | ']' | '{' | '|' | '}'))) => {
                    self.add_token(TokenKind::Solo, ch);
                    self.getct();
                }
                (CharClass::Punctuation, Some('"')) => {
                    self.getct();
                    let string = self.read_quoted('"');
                    self.add_token(TokenKind::String, string);
                }
                (CharClass::Punctuation, Some('\'')) => {
                    self.getct();
                    let atom = self.read_quoted('\'');
                    self.add_token(TokenKind::Atom, atom);
                }
                (_, Some(ch)) => {
                    tracing::warn!("character table has no dispatch for {:?}", ch);
                    return Err(ReadErr::Internal(format!("unrecognized character {:?}", ch))
                        .annotate(format!("at {}", self.saved)));
                }
            }
        }
    }

    /// Skip layout; a `(` right after it is an ordinary solo token, which is
    /// how the parser tells `foo (X)` from `foo(X)`.
    fn read_after_layout(&mut self) {
        self.skip_layout();
        if self.ch == Some('(') {
            self.save_position();
            self.add_token(TokenKind::Solo, '(');
            self.getct();
        }
    }

    /// Letters, digits and underscores following `name`.
    fn read_name(&mut self, mut name: String) -> String {
        while let Some(ch) = self.ch.filter(|&c| is_alphanumeric(Some(c))) {
            name.push(ch);
            self.getct();
        }
        name
    }

    /// Symbol chars following `symbol`.
    fn read_symbol(&mut self, mut symbol: String) -> String {
        while let Some(ch) = self.ch.filter(|&c| is_symbol(Some(c))) {
            symbol.push(ch);
            self.getct();
        }
        symbol
    }

    /// Called after a `/`: either a block comment or a graphic atom.
    /// Block comments do not nest.
    fn read_possible_comment(&mut self) {
        if self.ch != Some('*') {
            let symbol = self.read_symbol("/".to_owned());
            self.add_token(TokenKind::Atom, symbol);
            return;
        }
        loop {
            loop {
                self.getct();
                if self.ch == Some('*') || self.ch.is_none() {
                    break;
                }
            }
            self.getct();
            if self.ch.is_none() {
                tracing::debug!("runaway block comment starting at {}", self.saved);
                self.add_token(TokenKind::Solo, RUNAWAY_COMMENT);
                return;
            }
            while self.ch == Some('*') {
                self.getct();
            }
            if self.ch == Some('/') {
                break;
            }
        }
        self.getct();
        self.read_after_layout();
    }

    /// Called after a `.`: the end of a clause, or the start of a graphic atom.
    fn read_fullstop(&mut self) {
        match self.ch {
            None => self.add_token(TokenKind::Solo, '.'),
            Some('%') => {
                self.add_token(TokenKind::Solo, '.');
                self.skip_line();
            }
            ch if is_layout(ch) => self.add_token(TokenKind::Solo, '.'),
            _ => {
                let symbol = self.read_symbol(".".to_owned());
                self.add_token(TokenKind::Atom, symbol);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new(input, &TokenizerConfig::default())
            .run()
            .unwrap()
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokens(input).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn names_and_variables() {
        use TokenKind::*;
        let want = vec![
            (Atom, "foo_Bar9".to_owned()),
            (Variable, "X1".to_owned()),
            (Variable, "_".to_owned()),
            (Variable, "_tail".to_owned()),
            (EndOfFile, "".to_owned()),
        ];
        assert_eq!(tokens("foo_Bar9 X1 _ _tail"), want);
    }

    #[test]
    fn graphic_atoms() {
        use TokenKind::*;
        assert_eq!(
            tokens(":- a =.. b \\== c"),
            vec![
                (Atom, ":-".to_owned()),
                (Atom, "a".to_owned()),
                (Atom, "=..".to_owned()),
                (Atom, "b".to_owned()),
                (Atom, "\\==".to_owned()),
                (Atom, "c".to_owned()),
                (EndOfFile, "".to_owned()),
            ]
        );
    }

    #[test]
    fn solo_atoms_do_not_merge() {
        use TokenKind::*;
        assert_eq!(
            tokens("!=;->"),
            vec![
                (Atom, "!".to_owned()),
                (Atom, "=".to_owned()),
                (Atom, ";".to_owned()),
                (Atom, "->".to_owned()),
                (EndOfFile, "".to_owned()),
            ]
        );
    }

    #[test]
    fn punctuation() {
        use TokenKind::*;
        assert_eq!(
            kinds("[a|T]{x},"),
            vec![Solo, Atom, Solo, Variable, Solo, Solo, Atom, Solo, Solo, EndOfFile]
        );
    }

    #[test]
    fn paren_after_punctuation_and_layout() {
        use TokenKind::*;
        assert_eq!(
            kinds("f((a), (b))"),
            vec![Atom, SoloNoLayout, SoloNoLayout, Atom, Solo, Solo, Solo, Atom, Solo, Solo, EndOfFile]
        );
        assert_eq!(kinds("  (a)"), vec![Solo, Atom, Solo, EndOfFile]);
    }

    #[test]
    fn comment_counts_as_layout() {
        use TokenKind::*;
        assert_eq!(kinds("foo/* c */(X)"), vec![Atom, Solo, Variable, Solo, EndOfFile]);
        assert_eq!(kinds("foo% c\n(X)"), vec![Atom, Solo, Variable, Solo, EndOfFile]);
    }

    #[test]
    fn block_comments() {
        assert_eq!(tokens("a /**/ b /* x ** y **/ c"), tokens("a b c"));
        // No nesting: the first `*/` closes the comment.
        assert_eq!(
            tokens("/* a /* b */ c */"),
            vec![
                (TokenKind::Atom, "c".to_owned()),
                (TokenKind::Atom, "*/".to_owned()),
                (TokenKind::EndOfFile, "".to_owned()),
            ]
        );
    }

    #[test]
    fn runaway_comments() {
        for input in ["/*", "/* abc", "/* abc *", "/* abc **", "/*/"] {
            assert_eq!(
                tokens(input),
                vec![
                    (TokenKind::Solo, RUNAWAY_COMMENT.to_owned()),
                    (TokenKind::EndOfFile, "".to_owned()),
                ],
                "unexpected tokens for {:?}",
                input
            );
        }
    }

    #[test]
    fn slash_atoms() {
        use TokenKind::*;
        assert_eq!(
            tokens("X // 2 / Y"),
            vec![
                (Variable, "X".to_owned()),
                (Atom, "//".to_owned()),
                (Number, "2".to_owned()),
                (Atom, "/".to_owned()),
                (Variable, "Y".to_owned()),
                (EndOfFile, "".to_owned()),
            ]
        );
    }

    #[test]
    fn fullstops() {
        use TokenKind::*;
        assert_eq!(
            tokens("a.\nb.%done\nc.d"),
            vec![
                (Atom, "a".to_owned()),
                (Solo, ".".to_owned()),
                (Atom, "b".to_owned()),
                (Solo, ".".to_owned()),
                (Atom, "c".to_owned()),
                (Atom, ".".to_owned()),
                (Atom, "d".to_owned()),
                (EndOfFile, "".to_owned()),
            ]
        );
    }

    #[test]
    fn line_comment_at_end_of_input() {
        assert_eq!(tokens("% nothing here"), vec![(TokenKind::EndOfFile, "".to_owned())]);
    }

    #[test]
    fn positions() {
        let tokens = Tokenizer::new("p :-\n\tq(X).", &TokenizerConfig::default())
            .run()
            .unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.position.line, t.position.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 2), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6)]);
    }

    #[test]
    fn configured_tab_width() {
        let config = TokenizerConfig { tab_width: 8 };
        let tokens = Tokenizer::new("\tfoo", &config).run().unwrap();
        assert_eq!(tokens[0].position, Position::new(0, 8));
    }
}

//! Number literals.
//!
//! Unsigned numbers only (a leading `-` is a separate atom). The forms are:
//!
//! ```text
//! <digits>                                    decimal integer
//! <base> ' <base-digits>                      integer in base 2..36
//! <digits> . <digits>                         float
//! <digits> . <digits> (e|E) (-|+| ) <digits>  float with exponent
//! 0.Nan  0.Inf                                special floats
//! 0 ' <character>                             character code
//! 0b <bin-digits>  0o <oct-digits>  0x <hex-digits>
//! ```
//!
//! Token text keeps the literal form, except based integers (`16'1F` for
//! `0x1F`) and character codes (`97` for `0'a`).

use super::super::chars::{is_alphanumeric, is_digit};
use super::super::token::TokenKind;
use super::super::{ReadErr, ReadResult};
use super::Tokenizer;

const SPECIAL_FLOATS: [&str; 2] = ["Nan", "Inf"];

impl Tokenizer {
    /// Read a number starting at the current digit.
    pub(super) fn read_number(&mut self) -> ReadResult<()> {
        if self.ch == Some('0') {
            self.getct();
            self.read_after_zero()
        } else {
            self.read_digits(String::new());
            Ok(())
        }
    }

    fn read_after_zero(&mut self) -> ReadResult<()> {
        match self.ch {
            Some('.') if !is_digit(self.peek(0)) => {
                if !self.read_special_float() {
                    self.add_token(TokenKind::Number, "0");
                }
            }
            Some(marker @ ('b' | 'o' | 'x')) => {
                let base = match marker {
                    'b' => 2,
                    'o' => 8,
                    _ => 16,
                };
                let marker_position = self.position;
                let digits = self.read_based_int(base);
                if digits.is_empty() {
                    tracing::debug!("no base-{} digits after 0{} at {}", base, marker, self.saved);
                    self.add_token(TokenKind::Number, "0");
                    self.saved = marker_position;
                    let name = self.read_name(marker.to_string());
                    self.add_token(TokenKind::Atom, name);
                } else {
                    self.add_token(TokenKind::Number, format!("{base}'{digits}"));
                }
            }
            Some('\'') => {
                self.getct();
                let text = match self.read_quoted_character()? {
                    Some(ch) => (ch as u32).to_string(),
                    None => "0".to_owned(),
                };
                self.add_token(TokenKind::Number, text);
            }
            _ => self.read_digits("0".to_owned()),
        }
        Ok(())
    }

    /// `0.Nan` or `0.Inf`, with the current character on the `.`.
    /// Consumes nothing unless the whole suffix matches.
    fn read_special_float(&mut self) -> bool {
        for suffix in SPECIAL_FLOATS {
            let matches = suffix
                .chars()
                .enumerate()
                .all(|(i, ch)| self.peek(i) == Some(ch));
            if matches && !is_alphanumeric(self.peek(suffix.len())) {
                // The dot and the suffix.
                for _ in 0..=suffix.len() {
                    self.getct();
                }
                self.add_token(TokenKind::Number, format!("0.{suffix}"));
                return true;
            }
        }
        false
    }

    /// Decimal digits following `digits`, then a fraction or a base quote.
    fn read_digits(&mut self, mut digits: String) {
        self.push_digits(&mut digits);

        // A `.` not followed by a digit ends the clause, not the number.
        if self.ch == Some('.') && is_digit(self.peek(0)) {
            digits.push('.');
            self.getct();
            self.read_fraction(digits);
            return;
        }

        let base = digits.parse::<u32>().ok().filter(|base| (2..=36).contains(base));
        match (self.ch, base) {
            (Some('\''), Some(base)) => {
                let quote_position = self.position;
                let based = self.read_based_int(base);
                if based.is_empty() {
                    // Not a based integer after all: the quote opens an atom.
                    tracing::debug!("no base-{} digits after {}' at {}", base, digits, self.saved);
                    self.add_token(TokenKind::Number, digits);
                    self.saved = quote_position;
                    let atom = self.read_quoted('\'');
                    self.add_token(TokenKind::Atom, atom);
                } else {
                    self.add_token(TokenKind::Number, format!("{base}'{based}"));
                }
            }
            _ => self.add_token(TokenKind::Number, digits),
        }
    }

    /// Fraction digits and an optional exponent, with `text` holding
    /// everything up to and including the `.`.
    fn read_fraction(&mut self, mut text: String) {
        self.push_digits(&mut text);

        let e = match self.ch {
            Some(e @ ('e' | 'E')) => e,
            _ => {
                self.add_token(TokenKind::Number, text);
                return;
            }
        };
        let e_position = self.position;
        self.getct();

        match self.ch {
            Some(_) if is_digit(self.ch) => {
                text.push(e);
                self.push_digits(&mut text);
                self.add_token(TokenKind::Number, text);
            }
            Some(sign @ ('+' | '-')) => {
                let sign_position = self.position;
                self.getct();
                if is_digit(self.ch) {
                    text.push(e);
                    text.push(sign);
                    self.push_digits(&mut text);
                    self.add_token(TokenKind::Number, text);
                } else {
                    tracing::debug!("exponent without digits at {}", e_position);
                    self.add_token(TokenKind::Number, text);
                    self.saved = e_position;
                    self.add_token(exponent_kind(e), e);
                    self.saved = sign_position;
                    let symbol = self.read_symbol(sign.to_string());
                    self.add_token(TokenKind::Atom, symbol);
                }
            }
            _ => {
                tracing::debug!("exponent without digits at {}", e_position);
                self.add_token(TokenKind::Number, text);
                self.saved = e_position;
                let name = self.read_name(e.to_string());
                self.add_token(exponent_kind(e), name);
            }
        }
    }

    fn push_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.ch.filter(|&c| is_digit(Some(c))) {
            text.push(ch);
            self.getct();
        }
    }

    /// Skip the base marker (`b`, `o`, `x` or `'`) and read the digits valid
    /// in `base`, in either case.
    fn read_based_int(&mut self, base: u32) -> String {
        self.getct();
        let mut digits = String::new();
        while let Some(ch) = self.ch.filter(|c| c.is_ascii_alphanumeric() && c.is_digit(base)) {
            digits.push(ch);
            self.getct();
        }
        digits
    }

    /// The character after `0'`; `None` at end of input.
    fn read_quoted_character(&mut self) -> ReadResult<Option<char>> {
        loop {
            match self.ch {
                None => return Ok(None),
                Some('\\') => {
                    self.getct();
                    let mut decoded = String::new();
                    self.read_escape_sequence(&mut decoded);
                    let mut chars = decoded.chars();
                    match (chars.next(), chars.next()) {
                        // Continuation: the character is still to come.
                        (None, _) => continue,
                        (Some(ch), None) => return Ok(Some(ch)),
                        (Some(_), Some(_)) => {
                            tracing::warn!("escape sequence decoded to {:?}", decoded);
                            return Err(ReadErr::Internal(format!(
                                "escape sequence decoded to {:?}, expected a single character",
                                decoded
                            ))
                            .annotate(format!("at {}", self.position)));
                        }
                    }
                }
                Some('\'') => {
                    // Both `0''` and `0'''` are the quote itself.
                    self.getct();
                    if self.ch == Some('\'') {
                        self.getct();
                    }
                    return Ok(Some('\''));
                }
                Some(ch) => {
                    self.getct();
                    return Ok(Some(ch));
                }
            }
        }
    }
}

/// `e` continues as an atom, `E` as a variable.
fn exponent_kind(e: char) -> TokenKind {
    if e == 'E' {
        TokenKind::Variable
    } else {
        TokenKind::Atom
    }
}

#[cfg(test)]
mod tests {
    use super::super::TokenizerConfig;
    use super::*;
    use crate::reader::Token;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input, &TokenizerConfig::default()).run().unwrap()
    }

    fn tokens(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input)
            .into_iter()
            .filter(|token| token.kind != TokenKind::EndOfFile)
            .map(|token| (token.kind, token.text))
            .collect()
    }

    fn number(text: &str) -> Vec<(TokenKind, String)> {
        vec![(TokenKind::Number, text.to_owned())]
    }

    #[test]
    fn integers() {
        assert_eq!(tokens("42"), number("42"));
        assert_eq!(tokens("0"), number("0"));
        assert_eq!(tokens("007"), number("007"));
    }

    #[test]
    fn floats() {
        assert_eq!(tokens("1.5"), number("1.5"));
        assert_eq!(tokens("0.25"), number("0.25"));
        assert_eq!(tokens("6.02e23"), number("6.02e23"));
        assert_eq!(tokens("1.0E-10"), number("1.0E-10"));
        assert_eq!(tokens("2.5e+3"), number("2.5e+3"));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        use TokenKind::*;
        assert_eq!(tokens("1."), vec![(Number, "1".to_owned()), (Solo, ".".to_owned())]);
        assert_eq!(tokens("0."), vec![(Number, "0".to_owned()), (Solo, ".".to_owned())]);
        assert_eq!(
            tokens("X = 1.e"),
            vec![
                (Variable, "X".to_owned()),
                (Atom, "=".to_owned()),
                (Number, "1".to_owned()),
                (Atom, ".".to_owned()),
                (Atom, "e".to_owned()),
            ]
        );
    }

    #[test]
    fn exponent_without_digits() {
        use TokenKind::*;
        assert_eq!(
            tokens("1.5else"),
            vec![(Number, "1.5".to_owned()), (Atom, "else".to_owned())]
        );
        assert_eq!(
            tokens("1.5Ex"),
            vec![(Number, "1.5".to_owned()), (Variable, "Ex".to_owned())]
        );
        assert_eq!(
            tokens("1.5e+x"),
            vec![
                (Number, "1.5".to_owned()),
                (Atom, "e".to_owned()),
                (Atom, "+".to_owned()),
                (Atom, "x".to_owned()),
            ]
        );
        assert_eq!(
            tokens("1.5E-"),
            vec![
                (Number, "1.5".to_owned()),
                (Variable, "E".to_owned()),
                (Atom, "-".to_owned()),
            ]
        );
    }

    #[test]
    fn exponent_fallback_positions() {
        let tokens = tokenize("1.5e+x");
        let columns: Vec<_> = tokens.iter().map(|t| t.position.column).collect();
        assert_eq!(columns, vec![0, 3, 4, 5, 6]);
    }

    #[test]
    fn integers_take_no_exponent() {
        use TokenKind::*;
        assert_eq!(
            tokens("1e10"),
            vec![(Number, "1".to_owned()), (Atom, "e10".to_owned())]
        );
    }

    #[test]
    fn based_integers() {
        assert_eq!(tokens("2'1011"), number("2'1011"));
        assert_eq!(tokens("16'ff"), number("16'ff"));
        assert_eq!(tokens("36'Zz9"), number("36'Zz9"));
        // Digits stop at the first one out of range.
        assert_eq!(
            tokens("8'129"),
            vec![(TokenKind::Number, "8'12".to_owned()), (TokenKind::Number, "9".to_owned())]
        );
    }

    #[test]
    fn based_integer_fallback_to_quoted_atom() {
        use TokenKind::*;
        assert_eq!(
            tokens("2'abc'"),
            vec![(Number, "2".to_owned()), (Atom, "abc".to_owned())]
        );
        let positions: Vec<_> = tokenize("2'abc'").iter().map(|t| t.position.column).collect();
        assert_eq!(positions, vec![0, 1, 6]);
    }

    #[test]
    fn out_of_range_base_is_plain_integer() {
        use TokenKind::*;
        assert_eq!(
            tokens("37'a'"),
            vec![(Number, "37".to_owned()), (Atom, "a".to_owned())]
        );
        assert_eq!(
            tokens("1'a'"),
            vec![(Number, "1".to_owned()), (Atom, "a".to_owned())]
        );
    }

    #[test]
    fn prefixed_integers() {
        assert_eq!(tokens("0b1010"), number("2'1010"));
        assert_eq!(tokens("0o777"), number("8'777"));
        assert_eq!(tokens("0x1F"), number("16'1F"));
        assert_eq!(tokens("0xdeadBEEF"), number("16'deadBEEF"));
    }

    #[test]
    fn prefix_without_digits_is_atom() {
        use TokenKind::*;
        assert_eq!(
            tokens("0xg"),
            vec![(Number, "0".to_owned()), (Atom, "xg".to_owned())]
        );
        assert_eq!(
            tokens("0b2"),
            vec![(Number, "0".to_owned()), (Atom, "b2".to_owned())]
        );
        let columns: Vec<_> = tokenize("0o").iter().map(|t| t.position.column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
    }

    #[test]
    fn character_codes() {
        assert_eq!(tokens("0'a"), number("97"));
        assert_eq!(tokens("0' "), number("32"));
        assert_eq!(tokens("0'\\n"), number("10"));
        assert_eq!(tokens("0'\\x41\\"), number("65"));
        assert_eq!(tokens("0'\\^A"), number("1"));
        assert_eq!(tokens("0''"), number("39"));
        assert_eq!(tokens("0'''"), number("39"));
        assert_eq!(tokens("0'é"), number("233"));
    }

    #[test]
    fn character_code_after_continuation() {
        assert_eq!(tokens("0'\\\na"), number("97"));
    }

    #[test]
    fn character_code_at_end_of_input() {
        assert_eq!(tokens("0'"), number("0"));
        assert_eq!(tokens("0'\\"), number("0"));
    }

    #[test]
    fn special_floats() {
        use TokenKind::*;
        assert_eq!(tokens("0.Nan"), number("0.Nan"));
        assert_eq!(tokens("0.Inf."), vec![(Number, "0.Inf".to_owned()), (Solo, ".".to_owned())]);
        assert_eq!(
            tokens("0.Infinity"),
            vec![
                (Number, "0".to_owned()),
                (Atom, ".".to_owned()),
                (Variable, "Infinity".to_owned()),
            ]
        );
    }
}

//! Quoted atoms, strings and escape sequences.

use super::super::chars::{is_digit, is_layout, is_lower, is_symbol, is_upper};
use super::Tokenizer;

impl Tokenizer {
    /// Read up to the closing `quote`, with the opening quote already consumed.
    ///
    /// A doubled quote stands for the quote itself. Text cut off by the end
    /// of the input is returned as it stands.
    pub(super) fn read_quoted(&mut self, quote: char) -> String {
        let mut text = String::new();
        loop {
            match self.ch {
                None => {
                    tracing::debug!("unterminated {}-quoted text starting at {}", quote, self.saved);
                    break;
                }
                Some(ch) if ch == quote => {
                    self.getct();
                    if self.ch == Some(quote) {
                        text.push(quote);
                        self.getct();
                    } else {
                        break;
                    }
                }
                Some('\\') => {
                    self.getct();
                    self.read_escape_sequence(&mut text);
                }
                Some(ch) => {
                    text.push(ch);
                    self.getct();
                }
            }
        }
        text
    }

    /// Decode the escape sequence after a backslash into `text`.
    /// Continuations decode to nothing.
    pub(super) fn read_escape_sequence(&mut self, text: &mut String) {
        match self.ch {
            None => (),
            ch if is_layout(ch) => self.getct(),
            Some('^') => {
                self.getct();
                let ch = self.read_control_character();
                text.push(ch);
            }
            Some(ch) if is_digit(Some(ch)) && ch <= '7' => text.push(self.read_char_code(8)),
            Some('x') => {
                self.getct();
                text.push(self.read_char_code(16));
            }
            Some('c') => {
                self.getct();
                self.skip_layout();
            }
            Some(ch) => {
                text.push(symbolic_control_char(ch));
                self.getct();
            }
        }
    }

    /// `\^X`; anything unexpected after the caret is left alone and the caret
    /// stands for itself.
    fn read_control_character(&mut self) -> char {
        let ch = match self.ch {
            Some('?') => '\x7f',
            Some('@') => '\0',
            Some(ch)
                if is_upper(Some(ch))
                    || is_lower(Some(ch))
                    || (is_symbol(Some(ch)) && ('['..='^').contains(&ch)) =>
            {
                char::from((ch as u32 % 32) as u8)
            }
            _ => return '^',
        };
        self.getct();
        ch
    }

    /// `\NNN\` (octal) or `\xHH\` (hex), up to and including the closing
    /// backslash. Characters that are not digits of `base` are skipped.
    fn read_char_code(&mut self, base: u32) -> char {
        let mut code: u32 = 0;
        loop {
            match self.ch {
                None => {
                    tracing::debug!("unterminated character code escape at {}", self.position);
                    break;
                }
                Some('\\') => {
                    self.getct();
                    break;
                }
                Some(ch) => {
                    if let Some(digit) = ch.to_digit(base) {
                        code = code.saturating_mul(base).saturating_add(digit);
                    }
                    self.getct();
                }
            }
        }
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

fn symbolic_control_char(ch: char) -> char {
    match ch {
        'a' => '\x07',
        'b' => '\x08',
        't' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        'e' => '\x1b',
        's' => ' ',
        'd' => '\x7f',
        _ => ch,
    }
}

//! Character classes for the 8-bit character table.
//!
//! Every character the tokenizer sees is classified through a single table,
//! built the first time it is needed and shared (read-only) afterwards.

use std::sync::OnceLock;

/// Lexical class of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum CharClass {
    EndOfFile = -1,
    Layout = 0,
    LowerLetter = 1,
    /// Capital letters and `_`: these start variables.
    UpperLetterOrUnderscore = 2,
    Digit = 3,
    GraphicSymbol = 4,
    /// Solo characters that never merge with their neighbours.
    Punctuation = 5,
}

/// Number of character codes covered by the table.
const TABLE_SIZE: usize = 256;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "#$&*+-./:<=>?@^\\`~";
const PUNCTUATION: &str = "!;\"'%(),[]{|}";

fn table() -> &'static [CharClass; TABLE_SIZE] {
    static TABLE: OnceLock<[CharClass; TABLE_SIZE]> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Populate the table from scratch.
/// Rebuilding always yields the same table.
fn build_table() -> [CharClass; TABLE_SIZE] {
    let mut table = [CharClass::Layout; TABLE_SIZE];
    // 8-bit extended characters continue identifiers.
    for class in table.iter_mut().skip(128) {
        *class = CharClass::LowerLetter;
    }
    for (set, class) in [
        (LOWER, CharClass::LowerLetter),
        (UPPER, CharClass::UpperLetterOrUnderscore),
        (DIGITS, CharClass::Digit),
        (SYMBOLS, CharClass::GraphicSymbol),
        (PUNCTUATION, CharClass::Punctuation),
    ] {
        for ch in set.bytes() {
            table[ch as usize] = class;
        }
    }
    table
}

/// Classify a character; `None` stands for the end of the input.
///
/// Codes outside the 8-bit table (including 255) are treated as layout.
pub fn classify(ch: Option<char>) -> CharClass {
    match ch {
        None => CharClass::EndOfFile,
        Some(ch) => {
            let code = ch as u32 as usize;
            if code < TABLE_SIZE - 1 {
                table()[code]
            } else {
                CharClass::Layout
            }
        }
    }
}

pub fn is_layout(ch: Option<char>) -> bool {
    classify(ch) == CharClass::Layout
}

pub fn is_lower(ch: Option<char>) -> bool {
    classify(ch) == CharClass::LowerLetter
}

pub fn is_upper(ch: Option<char>) -> bool {
    classify(ch) == CharClass::UpperLetterOrUnderscore
}

pub fn is_digit(ch: Option<char>) -> bool {
    classify(ch) == CharClass::Digit
}

pub fn is_symbol(ch: Option<char>) -> bool {
    classify(ch) == CharClass::GraphicSymbol
}

/// Letters, digits and underscores.
pub fn is_alphanumeric(ch: Option<char>) -> bool {
    matches!(
        classify(ch),
        CharClass::LowerLetter | CharClass::UpperLetterOrUnderscore | CharClass::Digit
    )
}

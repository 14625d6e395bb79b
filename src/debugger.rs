//! Debugger marks: trace lines that point back into the source.
//!
//! While tracing, the interpreter prints lines such as
//!
//! ```text
//!    In /home/me/app.pl (12-15) append-2
//! ```
//!
//! meaning "the second occurrence of `append` in lines 12 to 15". Finding
//! that occurrence needs the tokenizer: the name may also appear inside
//! comments, quoted text or as part of longer names.

use crate::reader::{tokenize, ReadResult, Token};

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn mark() -> &'static Regex {
        static MARK: OnceLock<Regex> = OnceLock::new();
        MARK.get_or_init(|| {
            // File, first and last line (1-based), predicate name, occurrence.
            Regex::new(r" {0,9}In (.*) \(([0-9]+)-([0-9]+)\) (.*?)-([0-9]+)")
                .expect("could not compile regex for debugger marks")
        })
    }
}

/// A location reported by the debugger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMark {
    pub src_file: String,
    /// First line of the clause, zero-based.
    pub start_line: usize,
    /// Last line of the clause, zero-based.
    pub end_line: usize,
    pub pred_name: String,
    /// Which occurrence of `pred_name` in the clause, one-based.
    pub nth_pred: usize,
}

/// Where a debugger mark resolves to in the source, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkLocation {
    pub line: usize,
    pub column: usize,
    /// One past the last column of the predicate name.
    pub end_column: usize,
}

/// Whether the interpreter output line carries a debugger mark.
pub fn is_debugger_line(line: &str) -> bool {
    regex::mark().is_match(line)
}

/// Map a Windows path seen from WSL (`C:/...`) to its mount point (`/mnt/C/...`).
pub fn translate_path(path: &str) -> String {
    let separator = std::path::MAIN_SEPARATOR;
    let (first, rest) = match path.split_once(separator) {
        Some((first, rest)) => (first, Some(rest)),
        None => (path, None),
    };
    match (first.strip_suffix(':'), rest) {
        (Some(drive), Some(rest)) => format!("/mnt/{drive}{separator}{rest}"),
        (Some(drive), None) => format!("/mnt/{drive}"),
        (None, _) => path.to_owned(),
    }
}

/// The `nth` (one-based) atom token named `name`.
pub fn locate<'a>(tokens: &'a [Token], name: &str, nth: usize) -> Option<&'a Token> {
    if nth == 0 {
        return None;
    }
    tokens
        .iter()
        .filter(|token| token.is_atom(name))
        .nth(nth - 1)
}

impl DebugMark {
    /// Parse a debugger line; `None` if it carries no mark.
    pub fn parse(line: &str) -> Option<DebugMark> {
        let captures = regex::mark().captures(line)?;
        let number = |i: usize| captures.get(i)?.as_str().parse::<usize>().ok();
        Some(DebugMark {
            src_file: translate_path(captures.get(1)?.as_str()),
            start_line: number(2)?.saturating_sub(1),
            end_line: number(3)?.saturating_sub(1),
            pred_name: captures.get(4)?.as_str().to_owned(),
            nth_pred: number(5)?,
        })
    }

    /// Find the marked predicate in the full text of `src_file`.
    ///
    /// Only the lines of the mark are tokenized. `None` if the lines are not
    /// in the source or the occurrence is not found there.
    pub fn resolve(&self, source: &str) -> ReadResult<Option<MarkLocation>> {
        if self.end_line < self.start_line {
            return Ok(None);
        }
        let lines: Vec<&str> = source
            .lines()
            .skip(self.start_line)
            .take(self.end_line - self.start_line + 1)
            .collect();
        if lines.is_empty() {
            tracing::debug!("lines {}-{} are not in the source", self.start_line, self.end_line);
            return Ok(None);
        }

        let tokens = tokenize(&lines.join("\n"))?;
        let token = match locate(&tokens, &self.pred_name, self.nth_pred) {
            Some(token) => token,
            None => {
                tracing::debug!(
                    "occurrence {} of {:?} not found in lines {}-{}",
                    self.nth_pred,
                    self.pred_name,
                    self.start_line,
                    self.end_line
                );
                return Ok(None);
            }
        };
        // Atoms found by name always have a real column.
        let column = usize::try_from(token.position.column).unwrap_or(0);
        Ok(Some(MarkLocation {
            line: self.start_line + token.position.line,
            column,
            end_column: column + self.pred_name.chars().count(),
        }))
    }
}

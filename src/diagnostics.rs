//! Diagnostics from the interpreter's compiler messages.
//!
//! Loading a file prints brace-delimited message blocks, either grouped
//! under a context line
//!
//! ```text
//! {In /home/me/app.pl
//! WARNING: (lns 4-5) Predicate foo/1 undefined in source
//! ERROR: (lns 9-9) Bad clause body
//! }
//! ```
//!
//! or standing alone, as in `{WARNING: no main/0 defined }`.
//! Syntax errors are reported separately by the interpreter and are skipped.

use std::fmt::Display;

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn block() -> &'static Regex {
        static BLOCK: OnceLock<Regex> = OnceLock::new();
        BLOCK.get_or_init(|| {
            // A block ends at the first closing brace after its keyword.
            Regex::new(
                r"(?s)\{[^{}]*?\b(WARNING|ERROR|Reading|In|Compiling|Checking|Loading)\b.*?\}",
            )
            .expect("could not compile regex for message blocks")
        })
    }

    pub(super) fn syntax() -> &'static Regex {
        static SYNTAX: OnceLock<Regex> = OnceLock::new();
        SYNTAX.get_or_init(|| {
            Regex::new(r"\A\{SYNTAX (ERROR|WARNING)")
                .expect("could not compile regex for syntax messages")
        })
    }

    pub(super) fn lines() -> &'static Regex {
        static LINES: OnceLock<Regex> = OnceLock::new();
        LINES.get_or_init(|| {
            Regex::new(r"\A\(lns ([0-9]+)-([0-9]+)\)\s*")
                .expect("could not compile regex for line ranges")
        })
    }
}

/// Keywords that introduce a block of several messages.
const CONTEXT_KEYWORDS: &[&str] = &["Reading", "In", "Compiling", "Checking", "Loading"];

/// Source lines a message refers to, one-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub lines: Option<LineRange>,
    pub message: String,
}

impl Diagnostic {
    /// Whether the message can be attached to source lines.
    pub fn is_located(&self) -> bool {
        self.lines.is_some()
    }

    /// Build a diagnostic from the text after `WARNING:`/`ERROR:`.
    fn from_text(text: &str) -> Self {
        let text = text.trim();
        let Some(captures) = regex::lines().captures(text) else {
            return Diagnostic {
                lines: None,
                message: text.to_owned(),
            };
        };
        let number = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<usize>().ok());
        let lines = match (number(1), number(2)) {
            (Some(start), Some(end)) => Some(LineRange { start, end }),
            _ => None,
        };
        let rest = captures.get(0).map_or(0, |m| m.end());
        Diagnostic {
            lines,
            message: text[rest..].to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn push(&mut self, line: &str) {
        let text = after_colon(line);
        if line.contains("WARNING") {
            self.warnings.push(Diagnostic::from_text(text));
        } else if line.contains("ERROR") {
            self.errors.push(Diagnostic::from_text(text));
        }
    }
}

/// Text after the first colon, or all of it if there is none.
fn after_colon(text: &str) -> &str {
    text.split_once(':').map_or(text, |(_, rest)| rest)
}

/// Collect the warnings and errors from compiler output.
pub fn parse_messages(output: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    for captures in regex::block().captures_iter(output) {
        let (Some(block), Some(keyword)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let block = block.as_str();
        if regex::syntax().is_match(block) {
            continue;
        }
        if CONTEXT_KEYWORDS.contains(&keyword.as_str()) {
            for line in block.lines() {
                diagnostics.push(line.trim_end_matches('}'));
            }
        } else {
            let body = block.trim_start_matches('{').trim_end_matches('}');
            diagnostics.push(body);
        }
    }
    tracing::debug!(
        "found {} errors and {} warnings in compiler output",
        diagnostics.errors.len(),
        diagnostics.warnings.len()
    );
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(start: usize, end: usize, message: &str) -> Diagnostic {
        Diagnostic {
            lines: Some(LineRange { start, end }),
            message: message.to_owned(),
        }
    }

    fn unlocated(message: &str) -> Diagnostic {
        Diagnostic {
            lines: None,
            message: message.to_owned(),
        }
    }

    #[test]
    fn context_block() {
        let output = "\
{In /home/me/app.pl
WARNING: (lns 4-5) Predicate foo/1 undefined in source
ERROR: (lns 9-9) Bad clause body
}
yes
?- ";
        let diagnostics = parse_messages(output);
        assert_eq!(
            diagnostics.warnings,
            vec![located(4, 5, "Predicate foo/1 undefined in source")]
        );
        assert_eq!(diagnostics.errors, vec![located(9, 9, "Bad clause body")]);
    }

    #[test]
    fn standalone_blocks() {
        let output = "{WARNING: no main/0 defined }\n{ERROR: (lns 1-2) something broke}\n";
        let diagnostics = parse_messages(output);
        assert_eq!(diagnostics.warnings, vec![unlocated("no main/0 defined")]);
        assert_eq!(diagnostics.errors, vec![located(1, 2, "something broke")]);
        assert!(!diagnostics.warnings[0].is_located());
        assert!(diagnostics.errors[0].is_located());
    }

    #[test]
    fn several_context_blocks() {
        let output = "\
{Compiling /home/me/a.pl
WARNING: (lns 1-1) first
}
{Checking /home/me/b.pl
WARNING: (lns 2-3) second
}
";
        let diagnostics = parse_messages(output);
        assert_eq!(
            diagnostics.warnings,
            vec![located(1, 1, "first"), located(2, 3, "second")]
        );
        assert!(diagnostics.errors.is_empty());
    }

    #[test]
    fn skips_syntax_errors() {
        let output = "\
{SYNTAX ERROR: (lns 3-3) operator expected after expression
foo bar
** here **
}
";
        assert!(parse_messages(output).is_empty());
    }

    #[test]
    fn ignores_plain_output() {
        assert!(parse_messages("yes\n?- X = {a}.\nX = {a} ?\n").is_empty());
        assert!(parse_messages("").is_empty());
    }

    #[test]
    fn line_range_display() {
        assert_eq!(LineRange { start: 3, end: 7 }.to_string(), "3-7");
    }
}

//! Resolve debugger marks from interpreter output on stdin.
//!
//! For every trace line carrying a mark, prints where the marked predicate
//! occurrence is, as `file:line:column-end_column` (one-based, end inclusive).
//! Sources are read from the paths in the marks, unless a source file is given.
//!
//! ```ignore
//! <trace.txt dbg_mark [source.pl]
//! ```

use std::io::BufRead;

use ciao_reader::debugger::{is_debugger_line, DebugMark};

pub fn main() -> std::io::Result<()> {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source_override = std::env::args().nth(1);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if !is_debugger_line(&line) {
            continue;
        }
        let Some(mark) = DebugMark::parse(&line) else {
            continue;
        };
        let path = source_override.as_deref().unwrap_or(&mark.src_file);
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("could not read {}: {}", path, err);
                continue;
            }
        };
        match mark.resolve(&source)? {
            Some(location) => println!(
                "{}:{}:{}-{}",
                path,
                location.line + 1,
                location.column + 1,
                location.end_column
            ),
            None => tracing::info!(
                "no occurrence {} of {} in {} lines {}-{}",
                mark.nth_pred,
                mark.pred_name,
                path,
                mark.start_line + 1,
                mark.end_line + 1
            ),
        }
    }
    Ok(())
}

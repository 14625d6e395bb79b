//! Summarize the warnings and errors in compiler output read from stdin.
//!
//! ```ignore
//! <load_output.txt ciao_diagnostics
//! ```

use std::io::Read;

use ciao_reader::diagnostics::{parse_messages, Diagnostic};

fn print(severity: &str, diagnostic: &Diagnostic) {
    match diagnostic.lines {
        Some(lines) => println!("{severity}: lines {lines}: {}", diagnostic.message),
        None => println!("{severity}: {}", diagnostic.message),
    }
}

pub fn main() -> std::io::Result<()> {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut output = String::new();
    std::io::stdin().read_to_string(&mut output)?;

    let diagnostics = parse_messages(&output);
    for error in &diagnostics.errors {
        print("error", error);
    }
    for warning in &diagnostics.warnings {
        print("warning", warning);
    }
    Ok(())
}

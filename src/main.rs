//! Dump the tokens of Ciao Prolog source read from stdin, one per line:
//! zero-based line and column, kind, and the decoded text.
//!
//! ```ignore
//! <input.pl ciao-tokens
//! ```
//!
//! Set `TAB_WIDTH` to count tabs as more than one column.

use std::io::Read;

use ciao_reader::reader::TokenizerConfig;

fn main() {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = TokenizerConfig::default();
    if let Ok(width) = std::env::var("TAB_WIDTH") {
        config.tab_width = width
            .parse()
            .expect("error: TAB_WIDTH is not an integer");
    }

    let mut input = std::io::stdin().lock();
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .expect("error: could not read input");
    // Ciao sources are 8-bit; decode anything that isn't UTF-8 as Latin-1.
    let s: String = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    };

    let tokens =
        ciao_reader::tokenize_with(&s, &config).expect("error: failed to tokenize input");

    for token in tokens {
        println!("{}", token);
    }
}

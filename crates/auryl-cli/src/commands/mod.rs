//! CLI commands.

pub mod check;
pub mod lex;
pub mod parse;
pub mod tree;

use auryl_driver::{BuildConfig, BuildResult, Source};
use std::path::PathBuf;

/// Read `files` and build them, keeping the sources for error reports.
fn build(files: &[PathBuf], config: &BuildConfig) -> miette::Result<(Vec<Source>, BuildResult)> {
    let sources = auryl_driver::read_sources(files)?;
    let result = auryl_driver::build_sources(&sources, config);
    Ok((sources, result))
}

/// Print each error with its location and source line.
fn report_errors(sources: &[Source], result: &BuildResult) {
    for err in &result.errors {
        println!("error: {}", err.message);
        let (Some(file), Some((line, col))) = (&err.file, err.location) else {
            continue;
        };
        println!("   --> {}:{}:{}", file, line, col);
        let text = sources
            .iter()
            .find(|source| &source.name == file)
            .and_then(|source| source.text.lines().nth(line - 1));
        if let Some(text) = text {
            println!("    |");
            println!("{:4} | {}", line, text);
            println!("    |");
        }
    }
}

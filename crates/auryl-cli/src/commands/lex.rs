//! Lex command - tokenize a file.

use auryl_driver::offset_to_line_col;
use auryl_lexer::tokenize;
use std::fs;
use std::path::Path;

pub fn run(file: &Path) -> miette::Result<()> {
    let source = fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read file: {}", e))?;

    println!("Tokenizing: {}\n", file.display());

    let (tokens, errors) = tokenize(&source);

    for token in &tokens {
        let text = &source[token.span.clone()];
        let text_display = if text.chars().count() > 40 {
            format!("{}...", text.chars().take(40).collect::<String>())
        } else {
            text.to_string()
        };

        println!(
            "{:4}..{:4}  {:20}  {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind).chars().take(20).collect::<String>(),
            text_display.replace('\n', "\\n")
        );
    }

    for err in &errors {
        let (line, col) = offset_to_line_col(&source, err.span().start);
        println!("ERROR at {}:{}:{}: {}", file.display(), line, col, err);
    }

    println!("\n{} tokens, {} errors", tokens.len(), errors.len());

    if !errors.is_empty() {
        Err(miette::miette!("{} lexer errors", errors.len()))
    } else {
        Ok(())
    }
}

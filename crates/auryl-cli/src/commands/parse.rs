//! Parse command - parse a file and show the raw syntax tree.

use auryl_driver::offset_to_line_col;
use auryl_parser::parse;
use std::fs;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> miette::Result<()> {
    let source = fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read file: {}", e))?;

    let result = parse(&source);

    if json {
        let out = serde_json::to_string_pretty(&result.tree)
            .map_err(|e| miette::miette!("Failed to serialize syntax tree: {}", e))?;
        println!("{}", out);
    } else {
        println!("Parsing: {}\n", file.display());
        print!("{}", result.tree.pretty());
        println!(
            "\n{} components, {} errors",
            result
                .tree
                .nodes()
                .filter(|node| node.kind == auryl_syntax::SyntaxKind::Component)
                .count(),
            result.errors.len()
        );
    }

    // Errors go to stderr so JSON output stays parseable
    for err in &result.errors {
        let (line, col) = offset_to_line_col(&source, err.span().start);
        eprintln!("  {}:{}:{}: {}", file.display(), line, col, err);
    }

    if !result.errors.is_empty() {
        Err(miette::miette!("{} parse errors", result.errors.len()))
    } else {
        Ok(())
    }
}

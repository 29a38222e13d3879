//! Tree command - build files and print the component tree.

use auryl_driver::BuildConfig;
use auryl_tree::TreePrinter;
use std::path::PathBuf;

pub fn run(files: &[PathBuf], config: &BuildConfig) -> miette::Result<()> {
    let (sources, result) = super::build(files, config)?;

    if !result.success {
        super::report_errors(&sources, &result);
        return Err(miette::miette!("{} errors found", result.errors.len()));
    }

    print!("{}", TreePrinter::render(&result.tree, result.tree.root()));
    Ok(())
}

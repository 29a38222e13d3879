//! Check command - build files and report errors.

use auryl_driver::BuildConfig;
use std::path::PathBuf;

pub fn run(files: &[PathBuf], config: &BuildConfig) -> miette::Result<()> {
    let (sources, result) = super::build(files, config)?;

    for source in &sources[..result.files_built] {
        println!("Checking: {}\n  ok", source.name);
    }
    if let Some(failed) = sources.get(result.files_built) {
        println!("Checking: {}", failed.name);
    }
    super::report_errors(&sources, &result);

    println!();
    if result.success {
        println!(
            "Check complete: {} file(s), {} node(s), no issues found",
            result.files_built,
            result.tree.len()
        );
        Ok(())
    } else {
        let skipped = sources.len() - result.files_built - 1;
        if skipped > 0 {
            println!("{} later file(s) not checked", skipped);
        }
        println!("Check complete: {} error(s)", result.errors.len());
        Err(miette::miette!("{} errors found", result.errors.len()))
    }
}

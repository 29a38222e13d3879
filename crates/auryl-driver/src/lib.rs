//! Build driver for the Auryl component language.
//!
//! Runs the pipeline for a batch of files against one shared tree:
//! 1. Parsing
//! 2. Scope resolution into the [`ComponentTree`]
//!
//! Files are processed in the order given. The batch stops at the first
//! file with errors; later files may depend on it.

mod config;

pub use config::BuildConfig;

use std::ops::Range;
use std::path::{Path, PathBuf};

use auryl_tree::ComponentTree;

/// One input file, already read into memory.
#[derive(Debug, Clone)]
pub struct Source {
    /// Display name, usually the path.
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> miette::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// Build result.
pub struct BuildResult {
    /// Whether every file built.
    pub success: bool,
    /// The tree, complete on success, partial otherwise.
    pub tree: ComponentTree,
    /// Errors encountered.
    pub errors: Vec<CompilationError>,
    /// Number of files fully resolved into the tree.
    pub files_built: usize,
}

/// A build error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationError {
    pub message: String,
    pub file: Option<String>,
    pub span: Option<Range<usize>>,
    /// 1-based line and column of the span start.
    pub location: Option<(usize, usize)>,
}

impl CompilationError {
    fn new(message: String, source: &Source, span: Option<Range<usize>>) -> Self {
        let location = span
            .as_ref()
            .map(|span| offset_to_line_col(&source.text, span.start));
        Self {
            message,
            file: Some(source.name.clone()),
            span,
            location,
        }
    }
}

impl std::fmt::Display for CompilationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.file, self.location) {
            (Some(file), Some((line, col))) => write!(f, "{}:{}:{}: ", file, line, col)?,
            (Some(file), None) => write!(f, "{}: ", file)?,
            _ => {}
        }
        f.write_str(&self.message)
    }
}

/// Build in-memory sources into one tree.
pub fn build_sources(sources: &[Source], config: &BuildConfig) -> BuildResult {
    let mut tree = ComponentTree::new(config.root_name.clone());
    let mut errors = Vec::new();
    let mut files_built = 0;

    for source in sources {
        if config.verbose {
            tracing::info!("Building {}...", source.name);
        }

        let parse_result = auryl_parser::parse(&source.text);
        for err in &parse_result.errors {
            errors.push(CompilationError::new(
                err.to_string(),
                source,
                Some(err.span()),
            ));
        }
        if !errors.is_empty() {
            tracing::debug!("{}: {} parse error(s)", source.name, errors.len());
            break;
        }

        if let Err(err) = auryl_resolver::resolve(&mut tree, &parse_result.tree) {
            tracing::debug!("{}: resolution failed", source.name);
            errors.push(CompilationError::new(
                err.to_string(),
                source,
                err.span().map(|span| span.range()),
            ));
            break;
        }
        files_built += 1;
    }

    if config.verbose {
        tracing::info!(
            "Built {} of {} file(s), {} node(s)",
            files_built,
            sources.len(),
            tree.len()
        );
    }

    BuildResult {
        success: errors.is_empty(),
        tree,
        errors,
        files_built,
    }
}

/// Read every file in `paths`, in order.
///
/// All files are read before any is built, so a missing file fails the
/// whole batch up front.
pub fn read_sources(paths: &[PathBuf]) -> miette::Result<Vec<Source>> {
    if paths.is_empty() {
        return Err(miette::miette!("No files specified"));
    }
    paths.iter().map(|path| Source::read(path)).collect()
}

/// 1-based line and column of a byte offset.
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auryl_tree::{NodeKind, TreePrinter};
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_files_share_tree() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(
            dir.path(),
            "sensor.auryl",
            "package bar.biz;\ncomp sensor { out { reading: int; } }\n",
        );
        let second = write_file(
            dir.path(),
            "filter.auryl",
            "package bar.biz;\n\
             comp filter {\n\
                 in { raw: int; }\n\
                 out { clean: int; }\n\
                 data { window: int; }\n\
                 run { smooth [on in.raw; to out.clean]; }\n\
             }\n",
        );

        let sources = read_sources(&[first.clone(), second]).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, first.display().to_string());
        assert_eq!(
            sources[0].text,
            "package bar.biz;\ncomp sensor { out { reading: int; } }\n"
        );

        let result = build_sources(&sources, &BuildConfig::default());
        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.files_built, 2);

        insta::assert_snapshot!(TreePrinter::render(&result.tree, result.tree.root()), @r"
        Root
          package bar
            package biz
              comp sensor
                in
                out
                  reading: int
                data
              comp filter
                in
                  raw: int
                out
                  clean: int
                data
                  window: int
                run
                  smooth [on bar.biz.filter.in.raw; to bar.biz.filter.out.clean]
        ");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = write_file(dir.path(), "a.auryl", "comp a {}");
        let missing = dir.path().join("missing.auryl");

        let err = read_sources(&[present, missing.clone()]).unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));
        assert!(read_sources(&[]).is_err());
    }

    #[test]
    fn test_stops_at_first_failing_file() {
        let sources = [
            Source::new("ok.auryl", "comp a {}"),
            Source::new("bad.auryl", "comp b {\n  in { x: bogustype; }\n}"),
            Source::new("later.auryl", "comp c {}"),
        ];

        let result = build_sources(&sources, &BuildConfig::default());
        assert!(!result.success);
        assert_eq!(result.files_built, 1);
        assert_eq!(
            result.errors,
            [CompilationError {
                message: "cannot find type `bogustype`".to_string(),
                file: Some("bad.auryl".to_string()),
                span: Some(19..28),
                location: Some((2, 11)),
            }]
        );
        assert_eq!(
            result.errors[0].to_string(),
            "bad.auryl:2:11: cannot find type `bogustype`"
        );
        assert!(result.tree.lookup(result.tree.root(), &["a"]).is_some());
        assert!(result.tree.lookup(result.tree.root(), &["c"]).is_none());
    }

    #[test]
    fn test_parse_errors_reported() {
        let sources = [Source::new("broken.auryl", "comp a { in { x int; } }")];

        let result = build_sources(&sources, &BuildConfig::default());
        assert!(!result.success);
        assert_eq!(result.files_built, 0);
        assert!(!result.errors.is_empty());
        assert_eq!(result.errors[0].location, Some((1, 17)));
    }

    #[test]
    fn test_custom_root_name() {
        let config = BuildConfig::default().with_root_name("World");
        let sources = [Source::new("a.auryl", "package p; comp a {}")];

        let result = build_sources(&sources, &config);
        assert!(result.success);
        let tree = &result.tree;
        assert_eq!(tree.name(tree.root()), "World");
        let a = tree.lookup(tree.root(), &["World", "p", "a"]).unwrap();
        assert_eq!(tree.kind(a), &NodeKind::Component);
    }

    #[test]
    fn test_offset_to_line_col() {
        let source = "ab\ncd\n\nef";
        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 4), (2, 2));
        assert_eq!(offset_to_line_col(source, 7), (4, 1));
        assert_eq!(offset_to_line_col(source, 100), (4, 3));
    }
}

//! Batch conversion of a directory of song sources.
//!
//! Each file is converted independently with its own conversion context, so
//! files can be processed in parallel without sharing index state.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::constants::batch::OUTPUT_EXTENSION;
use crate::error::{Error, Result};
use crate::songbook::{convert, Options};
use crate::template::fill_template;

/// A successfully converted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Source file read.
    pub source: PathBuf,
    /// Output file written.
    pub output: PathBuf,
    /// Songs found in the source.
    pub songs: usize,
    /// Warnings raised while converting.
    pub warnings: usize,
}

/// Results of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted and written.
    pub converted: Vec<BatchOutcome>,
    /// Files that could not be read or written, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

/// Find source files under `root` whose extension is in `extensions`.
///
/// Results are sorted so batch output is deterministic.
pub fn discover_sources(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        })
        .collect();
    sources.sort();
    sources
}

/// Output path mirroring `source`'s position under `root` inside `out_dir`.
fn output_path(root: &Path, out_dir: &Path, source: &Path) -> PathBuf {
    let relative = source.strip_prefix(root).unwrap_or(source);
    out_dir.join(relative).with_extension(OUTPUT_EXTENSION)
}

fn convert_one(
    root: &Path,
    out_dir: &Path,
    source: &Path,
    options: &Options,
    template: Option<&str>,
) -> Result<BatchOutcome> {
    let text = fs_err::read_to_string(source).map_err(|e| Error::io(e, source.to_path_buf()))?;
    let conversion = convert(&text, options);

    let rendered = match template {
        Some(template) => fill_template(template, &conversion.fragment)?,
        None => conversion.fragment,
    };

    let output = output_path(root, out_dir, source);
    if let Some(parent) = output.parent() {
        fs_err::create_dir_all(parent).map_err(|e| Error::io(e, parent.to_path_buf()))?;
    }
    fs_err::write(&output, rendered).map_err(|e| Error::io(e, output.clone()))?;

    Ok(BatchOutcome {
        source: source.to_path_buf(),
        output,
        songs: conversion.songs,
        warnings: conversion.warnings.len(),
    })
}

/// Convert every matching source under `root` into `out_dir`.
pub fn convert_directory(
    root: &Path,
    out_dir: &Path,
    extensions: &[String],
    options: &Options,
    template: Option<&str>,
) -> BatchReport {
    let start = Instant::now();
    let sources = discover_sources(root, extensions);

    let results: Vec<(PathBuf, Result<BatchOutcome>)> = sources
        .par_iter()
        .map(|source| (source.clone(), convert_one(root, out_dir, source, options, template)))
        .collect();

    let mut report = BatchReport::default();
    for (source, result) in results {
        match result {
            Ok(outcome) => report.converted.push(outcome),
            Err(e) => {
                tracing::warn!("Failed to convert {}: {e}", source.display());
                report.failed.push((source, e));
            }
        }
    }

    tracing::info!(
        "Converted {} of {} files in {:?}",
        report.converted.len(),
        sources.len(),
        start.elapsed()
    );
    report
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_output_path_mirrors_tree() {
        let out = output_path(
            Path::new("/songs"),
            Path::new("/build"),
            Path::new("/songs/advent/ven.sng"),
        );
        assert_eq!(out, PathBuf::from("/build/advent/ven.tex"));
    }

    #[test]
    fn test_discover_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.sng"), "O A").unwrap();
        std::fs::write(dir.path().join("sub/b.TXT"), "O B").unwrap();
        std::fs::write(dir.path().join("c.pdf"), "").unwrap();

        let found = discover_sources(dir.path(), &["sng".to_string(), "txt".to_string()]);
        assert_eq!(found, vec![dir.path().join("a.sng"), dir.path().join("sub/b.TXT")]);
    }
}

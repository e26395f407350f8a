//! File access for mdtail.
//!
//! Resolves command line arguments into the list of documents to watch and reads
//! document content for rendering. Both are stateless; every render reads the file again.

use crate::config::General;
use crate::error::{ViewerError, ViewerResult};
use crate::utils::readable_path;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of document text.
pub trait ContentReader {
    fn read(&self, path: &Path) -> ViewerResult<String>;
}

/// Reads documents straight from disk.
///
/// Invalid UTF-8 is replaced rather than rejected, a half-written file should still display.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl ContentReader for FsReader {
    fn read(&self, path: &Path) -> ViewerResult<String> {
        let bytes = fs::read(path).map_err(|source| ViewerError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// Outcome of resolving the command line arguments.
#[derive(Debug, Default, PartialEq)]
pub struct Resolution {
    pub paths: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Turns raw arguments into absolute, deduplicated document paths.
///
/// - no arguments: the configured default document in `cwd`, if it exists
/// - arguments with `*`, `?` or `[`: glob expansion relative to `cwd`, sorted
/// - anything else: a single path relative to `cwd`
///
/// A bad argument adds a warning and is skipped.
pub fn resolve_documents(args: &[String], cwd: &Path, general: &General) -> Resolution {
    let mut found = Vec::new();
    let mut warnings = Vec::new();
    let extensions = general.extensions();

    if args.is_empty() {
        let default = cwd.join(general.default_document());
        if default.is_file() {
            found.push(canonical(default));
        }
    }

    for arg in args {
        if is_pattern(arg) {
            expand_pattern(arg, cwd, extensions, &mut found, &mut warnings);
            continue;
        }

        let path = cwd.join(arg);
        if !has_allowed_extension(&path, extensions) {
            warnings.push(extension_warning(arg, extensions));
        } else if !path.is_file() {
            warnings.push(format!("{arg} not found"));
        } else {
            found.push(canonical(path));
        }
    }

    let mut seen = HashSet::new();
    found.retain(|p| seen.insert(p.clone()));

    Resolution {
        paths: found,
        warnings,
    }
}

fn expand_pattern(
    arg: &str,
    cwd: &Path,
    extensions: &[String],
    found: &mut Vec<PathBuf>,
    warnings: &mut Vec<String>,
) {
    let pattern = cwd.join(arg);
    let pattern = pattern.to_string_lossy();

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(format!("invalid pattern {arg}: {e}"));
            return;
        }
    };

    let mut matched: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() && has_allowed_extension(&path, extensions) => {
                matched.push(canonical(path));
            }
            Ok(_) => {}
            Err(e) => warnings.push(format!(
                "Unable to read directory: {} ({})",
                readable_path(e.path()),
                e.error()
            )),
        }
    }

    if matched.is_empty() {
        warnings.push(format!("no matching files for {arg}"));
    }
    matched.sort();
    found.extend(matched);
}

#[inline]
fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn canonical(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}

/// An empty extension list accepts every file.
pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

fn extension_warning(arg: &str, extensions: &[String]) -> String {
    if extensions.len() == 1 && extensions[0].eq_ignore_ascii_case("md") {
        format!("{arg} is not a markdown file")
    } else {
        format!(
            "{arg} does not have an allowed extension ({})",
            extensions.join(", ")
        )
    }
}

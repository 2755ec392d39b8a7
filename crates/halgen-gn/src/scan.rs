//! Source tree scanning.
//!
//! Walks one source root, keeps entries whose file name matches the root's
//! patterns and splits them into kept and excluded candidates with a
//! [`ChipFilter`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::Pattern;
use halgen_chips::ChipFilter;
use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Glob applied to file names when a root does not list its own.
pub const DEFAULT_PATTERN: &str = "*.c";

/// Outcome of scanning one source root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootReport {
    /// The root as it appears in emitted paths.
    pub root: PathBuf,
    /// Candidates that survived the chip filter, in traversal order.
    pub kept: Vec<String>,
    /// Candidates dropped by the chip filter, with the chip that claimed them.
    pub excluded: Vec<(String, String)>,
}

impl RootReport {
    /// Number of candidate files found before filtering.
    pub fn candidates(&self) -> usize {
        self.kept.len() + self.excluded.len()
    }
}

/// Compile file name globs.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p.as_ref()).map_err(Into::into))
        .collect()
}

/// Scan `root` and filter its candidates.
///
/// The tree is read from `base_dir.join(root)` but candidates are named
/// `root` joined with their path below it, so emitted paths stay relative to
/// wherever the build file lives. The chip filter sees exactly the emitted
/// path. A root that does not exist has no candidates; any other traversal
/// error aborts the scan.
pub fn scan_root(
    base_dir: &Path,
    root: &Path,
    patterns: &[Pattern],
    filter: &ChipFilter<'_>,
    sorted: bool,
) -> Result<RootReport> {
    let disk_root = base_dir.join(root);
    let mut walker = WalkDir::new(&disk_root);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut report = RootReport {
        root: root.to_path_buf(),
        ..RootReport::default()
    };

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 && is_not_found(&err) => {
                debug!("{} does not exist, no sources", disk_root.display());
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !patterns.iter().any(|p| p.matches(&file_name)) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&disk_root)
            .unwrap_or_else(|_| entry.path());
        let candidate = root.join(relative).to_string_lossy().into_owned();

        match filter.excluded_by(&candidate) {
            Some(chip) => {
                debug!("excluding {candidate}: belongs to {chip}");
                report.excluded.push((candidate, chip.to_string()));
            }
            None => report.kept.push(candidate),
        }
    }

    Ok(report)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound)
}

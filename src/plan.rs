use crate::errors::ExportError;
use crate::ignore::{IgnoreRuleSet, PATTERN_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

pub const GIT_DIR_NAME: &str = ".git";

/// One file selected for copying: absolute source path plus its path
/// relative to the export root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub relative: PathBuf,
}

/// The precomputed set of files to copy, in walk order. Built fresh for
/// each run and discarded afterwards.
#[derive(Debug, Default)]
pub struct ExportPlan {
    entries: Vec<PlanEntry>,
}

impl ExportPlan {
    /// Walks the tree under `root` and selects every file not excluded by
    /// `rules`. The walk is sorted by file name so the plan order is
    /// reproducible across runs.
    ///
    /// Subtrees are pruned before recursing when the directory is the
    /// output directory itself, is named `.git`, or matches an exclusion
    /// pattern. Pruning compares exact path segments, never substrings, so
    /// a directory named e.g. `my.github-notes` is walked normally.
    pub fn build(
        root: &Path,
        output_dir: &Path,
        rules: &IgnoreRuleSet,
    ) -> Result<Self, ExportError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| keep_entry(e, root, output_dir, rules));

        for entry in walker {
            let entry = entry.map_err(|e| ExportError::ScanError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| ExportError::ScanError(e.to_string()))?
                .to_path_buf();

            // The rule file itself stays behind.
            if relative == Path::new(PATTERN_FILE_NAME) {
                continue;
            }

            if rules.is_excluded(&relative, false) {
                trace!("Excluded by pattern: {}", relative.display());
                continue;
            }

            entries.push(PlanEntry {
                source: entry.path().to_path_buf(),
                relative,
            });
        }

        debug!("Planned {} files for export", entries.len());
        Ok(ExportPlan { entries })
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Skip predicate evaluated before recursing into a directory.
fn keep_entry(entry: &DirEntry, root: &Path, output_dir: &Path, rules: &IgnoreRuleSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    if entry.path() == output_dir || entry.file_name() == GIT_DIR_NAME {
        trace!("Pruning subtree: {}", entry.path().display());
        return false;
    }
    match entry.path().strip_prefix(root) {
        Ok(relative) => !rules.is_excluded(relative, true),
        Err(_) => true,
    }
}

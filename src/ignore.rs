use crate::errors::ExportError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PATTERN_FILE_NAME: &str = ".gitignore";

/// Compiled gitignore rules for one export run. Immutable after load.
pub struct IgnoreRuleSet {
    matcher: Gitignore,
}

impl IgnoreRuleSet {
    /// Loads and compiles the pattern file at the top level of `root`.
    ///
    /// A missing pattern file is a reported failure, not a crash; nothing
    /// is written to disk before this succeeds.
    pub fn load(root: &Path) -> Result<Self, ExportError> {
        let pattern_file = root.join(PATTERN_FILE_NAME);
        if !pattern_file.is_file() {
            return Err(ExportError::MissingPatternFile(pattern_file));
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&pattern_file) {
            return Err(ExportError::PatternParseError(err.to_string()));
        }
        let matcher = builder
            .build()
            .map_err(|e| ExportError::PatternParseError(e.to_string()))?;

        debug!(
            "Loaded {} patterns from {}",
            matcher.len(),
            pattern_file.display()
        );
        Ok(IgnoreRuleSet { matcher })
    }

    pub fn pattern_file(root: &Path) -> PathBuf {
        root.join(PATTERN_FILE_NAME)
    }

    /// Tests a path relative to the export root against the rules.
    ///
    /// Later patterns override earlier ones and `!` re-includes, per the
    /// standard gitignore algorithm. A path under an excluded directory is
    /// excluded even if no pattern names it directly.
    pub fn is_excluded<P: AsRef<Path>>(&self, relative: P, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative.as_ref(), is_dir)
            .is_ignore()
    }
}

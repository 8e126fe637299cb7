use crate::errors::ExportError;
use crate::events::{ExportPhase, ExportProgress, ExportReporter};
use crate::ignore::IgnoreRuleSet;
use crate::plan::{ExportPlan, PlanEntry};
use async_trait::async_trait;
use filetime::FileTime;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info};

pub const OUTPUT_DIR_SUFFIX: &str = "-Output";

/// Terminal outcome of a successful export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub output_dir: PathBuf,
    pub copied: usize,
}

#[async_trait]
pub trait ProjectExporter {
    async fn export(&self, root: &Path) -> Result<ExportOutcome, ExportError>;
}

pub struct BasicProjectExporter<R: ExportReporter> {
    reporter: R,
}

impl<R: ExportReporter> BasicProjectExporter<R> {
    pub fn new(reporter: R) -> Self {
        BasicProjectExporter { reporter }
    }

    async fn copy_entry(&self, entry: &PlanEntry, output_dir: &Path) -> Result<(), ExportError> {
        let dest = output_dir.join(&entry.relative);
        let copy_error = |e: std::io::Error| ExportError::CopyIoError {
            path: entry.relative.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = dest.parent() {
            async_fs::create_dir_all(parent).await.map_err(copy_error)?;
        }
        async_fs::copy(&entry.source, &dest)
            .await
            .map_err(copy_error)?;

        // shutil.copy2 parity: the copy carries the source mtime.
        let metadata = async_fs::metadata(&entry.source)
            .await
            .map_err(copy_error)?;
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(&dest, mtime).map_err(copy_error)?;

        Ok(())
    }
}

#[async_trait]
impl<R: ExportReporter> ProjectExporter for BasicProjectExporter<R> {
    /// Runs one export: load patterns, plan the tree, copy the plan.
    ///
    /// The steps are strictly ordered and sequential, so progress
    /// notifications arrive in copy order. At most one run may be in
    /// flight per root at a time; the run owns its rule set and plan
    /// exclusively and carries no state over to the next run.
    async fn export(&self, root: &Path) -> Result<ExportOutcome, ExportError> {
        let root = root
            .canonicalize()
            .map_err(|e| ExportError::ScanError(format!("{}: {}", root.display(), e)))?;
        if !root.is_dir() {
            return Err(ExportError::ScanError(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        self.reporter.on_phase(ExportPhase::Scanning).await;
        self.reporter
            .on_log(&format!("Analyzing {}", IgnoreRuleSet::pattern_file(&root).display()))
            .await;

        // Pattern load happens first: a missing or malformed pattern file
        // aborts the run before the output directory is created.
        let rules = IgnoreRuleSet::load(&root)?;

        let output_dir = output_dir_for(&root)?;
        async_fs::create_dir_all(&output_dir).await?;
        debug!("Output directory: {}", output_dir.display());

        let plan = ExportPlan::build(&root, &output_dir, &rules)?;
        let total = plan.len();

        if plan.is_empty() {
            self.reporter
                .on_progress(&ExportProgress {
                    copied: 0,
                    total: 0,
                    last_copied: None,
                })
                .await;
            self.reporter.on_log("No files matched, nothing to copy").await;
            return Ok(ExportOutcome {
                output_dir,
                copied: 0,
            });
        }

        self.reporter.on_phase(ExportPhase::Copying).await;

        let mut copied = 0;
        for entry in plan.entries() {
            self.copy_entry(entry, &output_dir).await?;
            copied += 1;

            self.reporter
                .on_progress(&ExportProgress {
                    copied,
                    total,
                    last_copied: Some(entry.relative.clone()),
                })
                .await;
            self.reporter
                .on_log(&format!("Copied: {}", entry.relative.display()))
                .await;
        }

        self.reporter
            .on_log(&format!(
                "Done, {} of {} files copied to {}",
                copied,
                total,
                output_dir.display()
            ))
            .await;
        info!("Export finished: {} files", copied);

        Ok(ExportOutcome { output_dir, copied })
    }
}

/// The output directory is a sibling of the root, `<basename>-Output`.
/// Re-running into an existing output directory overwrites matching files
/// and leaves unrelated pre-existing ones alone.
fn output_dir_for(root: &Path) -> Result<PathBuf, ExportError> {
    let name = root
        .file_name()
        .ok_or_else(|| ExportError::ScanError(format!("{} has no basename", root.display())))?;
    let parent = root
        .parent()
        .ok_or_else(|| ExportError::ScanError(format!("{} has no parent", root.display())))?;
    Ok(parent.join(format!("{}{}", name.to_string_lossy(), OUTPUT_DIR_SUFFIX)))
}

pub async fn export_project<R: ExportReporter>(
    root: &Path,
    reporter: R,
) -> Result<ExportOutcome, ExportError> {
    let exporter = BasicProjectExporter::new(reporter);
    exporter.export(root).await
}

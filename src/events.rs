use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Phases of one export run: `Idle -> Scanning -> Copying -> done`.
/// Only `Copying` produces numeric percentage progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Scanning,
    Copying,
}

/// One tick of copy progress, emitted after each successful copy and once
/// (as 0/0) when the plan turns out empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    pub copied: usize,
    pub total: usize,
    pub last_copied: Option<PathBuf>,
}

impl ExportProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.copied as f64 / self.total as f64) * 100.0).round() as u8
    }
}

/// Notification surface the embedding caller subscribes to. A CLI, a test
/// harness, or a graphical front end all consume the same three channels:
/// phase changes, progress ticks, and log lines. Notifications arrive in
/// the order files were copied.
#[async_trait]
pub trait ExportReporter: Send + Sync {
    async fn on_phase(&self, phase: ExportPhase);
    async fn on_progress(&self, progress: &ExportProgress);
    async fn on_log(&self, line: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Phase(ExportPhase),
    Progress(ExportProgress),
    Log(String),
}

/// Forwards every notification onto an unbounded channel, for embeddings
/// that drive a UI from another task.
pub struct ChannelReporter {
    sender: UnboundedSender<ExportEvent>,
}

impl ChannelReporter {
    pub fn new(sender: UnboundedSender<ExportEvent>) -> Self {
        ChannelReporter { sender }
    }

    fn send(&self, event: ExportEvent) {
        if self.sender.send(event).is_err() {
            warn!("Export event receiver dropped, notification lost");
        }
    }
}

#[async_trait]
impl ExportReporter for ChannelReporter {
    async fn on_phase(&self, phase: ExportPhase) {
        self.send(ExportEvent::Phase(phase));
    }

    async fn on_progress(&self, progress: &ExportProgress) {
        self.send(ExportEvent::Progress(progress.clone()));
    }

    async fn on_log(&self, line: &str) {
        self.send(ExportEvent::Log(line.to_owned()));
    }
}

/// Renders notifications straight to the log, for CLI embeddings.
pub struct TracingReporter;

#[async_trait]
impl ExportReporter for TracingReporter {
    async fn on_phase(&self, phase: ExportPhase) {
        match phase {
            ExportPhase::Scanning => info!("Scanning project tree"),
            ExportPhase::Copying => info!("Copying files"),
        }
    }

    async fn on_progress(&self, progress: &ExportProgress) {
        info!(
            "[{:>3}%] {}/{}",
            progress.percent(),
            progress.copied,
            progress.total
        );
    }

    async fn on_log(&self, line: &str) {
        info!("{}", line);
    }
}
